use thiserror::Error;

/// 浮点比较容差
pub const REFUND_EPSILON: f64 = 1e-5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RefundError {
    #[error("退押金额必须大于 0: {0}")]
    NonPositiveAmount(f64),

    #[error("退押超出押金上限: 押金 {deposit}, 累计退押将达 {attempted}")]
    ExceedsDeposit { deposit: f64, attempted: f64 },
}

/// 计算一次部分退押后的累计退押列值（历史符号约定：存负数）。
/// `refund_deposit` 为账单当前列值（<= 0），返回更新后的列值。
pub fn apply_refund(
    deposit: f64,
    refund_deposit: f64,
    amount: f64,
) -> Result<f64, RefundError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(RefundError::NonPositiveAmount(amount));
    }
    let attempted = refund_deposit.abs() + amount;
    if attempted > deposit + REFUND_EPSILON {
        return Err(RefundError::ExceedsDeposit { deposit, attempted });
    }
    Ok(-attempted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_refund_sequence() {
        // 押金 100：退 60 成功，再退 50 拒绝，再退 40 成功刚好退完
        let first = apply_refund(100.0, 0.0, 60.0).unwrap();
        assert_eq!(first, -60.0);

        assert_eq!(
            apply_refund(100.0, first, 50.0),
            Err(RefundError::ExceedsDeposit {
                deposit: 100.0,
                attempted: 110.0,
            })
        );

        let second = apply_refund(100.0, first, 40.0).unwrap();
        assert_eq!(second, -100.0);

        // 已退完，任何再退都超限
        assert!(apply_refund(100.0, second, 0.01).is_err());
    }

    #[test]
    fn test_rejected_refund_leaves_value_unchanged() {
        let current = -60.0;
        let result = apply_refund(100.0, current, 50.0);
        assert!(result.is_err());
        // 失败不产生新列值，调用方保持原值
        assert_eq!(current, -60.0);
    }

    #[test]
    fn test_non_positive_amount() {
        assert!(matches!(
            apply_refund(100.0, 0.0, 0.0),
            Err(RefundError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            apply_refund(100.0, 0.0, -5.0),
            Err(RefundError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_float_tolerance_at_cap() {
        // 三笔 0.1 共 0.3，浮点误差不应导致刚好退满被拒
        let mut column = 0.0;
        for _ in 0..3 {
            column = apply_refund(0.3, column, 0.1).unwrap();
        }
        assert!((column + 0.3).abs() < REFUND_EPSILON);
    }
}
