use crate::config::HandoverConfig;
use crate::entities::bill_entity;
use crate::ledger::stay::{PaymentMethod, StayType};
use std::collections::BTreeMap;

/// 账单变动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// 订单结算（"订单账单"）
    Settlement,
    /// 退押变动行（"退押"）
    DepositRefund,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Settlement => "订单账单",
            ChangeType::DepositRefund => "退押",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "订单账单" => Some(ChangeType::Settlement),
            "退押" => Some(ChangeType::DepositRefund),
            _ => None,
        }
    }
}

/// 参与当日对账的账单行，从 bills 表行投影而来
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillEntry {
    pub change_type: ChangeType,
    pub stay_type: StayType,
    pub pay_way: PaymentMethod,
    pub deposit: f64,
    pub room_fee: f64,
    pub change_price: f64,
}

impl BillEntry {
    /// 未知 change_type 的历史行不参与对账
    pub fn from_model(m: &bill_entity::Model) -> Option<Self> {
        Some(Self {
            change_type: ChangeType::parse(&m.change_type)?,
            stay_type: StayType::parse(&m.stay_type).unwrap_or(StayType::Overnight),
            pay_way: PaymentMethod::parse_lossy(&m.pay_way),
            deposit: m.deposit,
            room_fee: m.room_fee,
            change_price: m.change_price,
        })
    }
}

/// 单一支付方式一天的对账结果
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MethodDay {
    /// 备用金 = 前一日同方式的交接金额
    pub reserve: f64,
    pub room_income: f64,
    pub rest_income: f64,
    /// 房租收入为人工录入项，计算时只透传
    pub rent_income: f64,
    pub room_refund: f64,
    pub rest_refund: f64,
    pub retained: f64,
}

impl MethodDay {
    pub fn total_income(&self) -> f64 {
        self.reserve + self.room_income + self.rest_income + self.rent_income
    }

    pub fn handover(&self) -> f64 {
        self.total_income() - self.room_refund - self.rest_refund - self.retained
    }
}

/// 取消的订单不计费：其结算行不参与当日对账。
/// 退押行始终参与，退出去的钱是真实的现金流出。
pub fn counts_for_day(change: ChangeType, order_cancelled: bool) -> bool {
    match change {
        ChangeType::Settlement => !order_cancelled,
        ChangeType::DepositRefund => true,
    }
}

pub fn retained_for(config: &HandoverConfig, method: PaymentMethod) -> f64 {
    match method {
        PaymentMethod::Cash => config.retained_cash,
        PaymentMethod::Wechat => config.retained_wechat,
        PaymentMethod::Digital => config.retained_digital,
        PaymentMethod::Other => config.retained_other,
    }
}

/// 计算某业务日全部 4 种支付方式的对账。
///
/// 结算行把押金计入毛收入，退押日再按退押行扣回——收进来记一次、
/// 退出去记一次，两本账的口径必须与历史数据保持一致,不做合并简化。
pub fn compute_day(
    prev_handover: &BTreeMap<PaymentMethod, f64>,
    bills: &[BillEntry],
    rent_income: &BTreeMap<PaymentMethod, f64>,
    config: &HandoverConfig,
) -> BTreeMap<PaymentMethod, MethodDay> {
    let mut result: BTreeMap<PaymentMethod, MethodDay> = PaymentMethod::ALL
        .iter()
        .map(|&m| {
            (
                m,
                MethodDay {
                    reserve: prev_handover.get(&m).copied().unwrap_or(0.0),
                    rent_income: rent_income.get(&m).copied().unwrap_or(0.0),
                    retained: retained_for(config, m),
                    ..Default::default()
                },
            )
        })
        .collect();

    for bill in bills {
        let day = result
            .get_mut(&bill.pay_way)
            .expect("all payment methods pre-seeded");
        match (bill.change_type, bill.stay_type) {
            (ChangeType::Settlement, StayType::Overnight) => {
                day.room_income += bill.room_fee + bill.deposit;
            }
            (ChangeType::Settlement, StayType::RestRoom) => {
                day.rest_income += bill.room_fee + bill.deposit;
            }
            (ChangeType::DepositRefund, StayType::Overnight) => {
                day.room_refund += bill.change_price.abs();
            }
            (ChangeType::DepositRefund, StayType::RestRoom) => {
                day.rest_refund += bill.change_price.abs();
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settlement(pay_way: PaymentMethod, stay_type: StayType, room_fee: f64, deposit: f64) -> BillEntry {
        BillEntry {
            change_type: ChangeType::Settlement,
            stay_type,
            pay_way,
            deposit,
            room_fee,
            change_price: 0.0,
        }
    }

    fn refund(pay_way: PaymentMethod, stay_type: StayType, amount: f64) -> BillEntry {
        BillEntry {
            change_type: ChangeType::DepositRefund,
            stay_type,
            pay_way,
            deposit: 0.0,
            room_fee: 0.0,
            change_price: -amount,
        }
    }

    #[test]
    fn test_reserve_chains_from_previous_handover() {
        // 前一日现金交接 1800，当日现金备用金必须是 1800
        let mut prev = BTreeMap::new();
        prev.insert(PaymentMethod::Cash, 1800.0);

        let days = compute_day(&prev, &[], &BTreeMap::new(), &HandoverConfig::default());
        assert_eq!(days[&PaymentMethod::Cash].reserve, 1800.0);
        assert_eq!(days[&PaymentMethod::Wechat].reserve, 0.0);
    }

    #[test]
    fn test_missing_previous_day_means_zero_reserve() {
        let days = compute_day(
            &BTreeMap::new(),
            &[],
            &BTreeMap::new(),
            &HandoverConfig::default(),
        );
        for m in PaymentMethod::ALL {
            assert_eq!(days[&m].reserve, 0.0);
        }
    }

    #[test]
    fn test_retained_policy_cash_only_by_default() {
        let config = HandoverConfig::default();
        let days = compute_day(&BTreeMap::new(), &[], &BTreeMap::new(), &config);
        assert_eq!(days[&PaymentMethod::Cash].retained, 320.0);
        assert_eq!(days[&PaymentMethod::Wechat].retained, 0.0);
        assert_eq!(days[&PaymentMethod::Digital].retained, 0.0);
        assert_eq!(days[&PaymentMethod::Other].retained, 0.0);
    }

    #[test]
    fn test_settlement_income_includes_deposit() {
        // 押金在结算日计入毛收入，退押日再扣回
        let bills = [
            settlement(PaymentMethod::Cash, StayType::Overnight, 470.0, 100.0),
            settlement(PaymentMethod::Cash, StayType::RestRoom, 150.0, 50.0),
        ];
        let days = compute_day(
            &BTreeMap::new(),
            &bills,
            &BTreeMap::new(),
            &HandoverConfig::default(),
        );
        let cash = &days[&PaymentMethod::Cash];
        assert_eq!(cash.room_income, 570.0);
        assert_eq!(cash.rest_income, 200.0);
        assert_eq!(cash.total_income(), 770.0);
        assert_eq!(cash.handover(), 770.0 - 320.0);
    }

    #[test]
    fn test_refunds_subtract_by_stay_type() {
        let bills = [
            settlement(PaymentMethod::Wechat, StayType::Overnight, 300.0, 100.0),
            refund(PaymentMethod::Wechat, StayType::Overnight, 100.0),
            refund(PaymentMethod::Wechat, StayType::RestRoom, 30.0),
        ];
        let days = compute_day(
            &BTreeMap::new(),
            &bills,
            &BTreeMap::new(),
            &HandoverConfig::default(),
        );
        let wechat = &days[&PaymentMethod::Wechat];
        assert_eq!(wechat.room_income, 400.0);
        assert_eq!(wechat.room_refund, 100.0);
        assert_eq!(wechat.rest_refund, 30.0);
        assert_eq!(wechat.handover(), 400.0 - 100.0 - 30.0);
    }

    #[test]
    fn test_rent_income_passes_through() {
        let mut rent = BTreeMap::new();
        rent.insert(PaymentMethod::Other, 600.0);
        let days = compute_day(
            &BTreeMap::new(),
            &[],
            &rent,
            &HandoverConfig::default(),
        );
        assert_eq!(days[&PaymentMethod::Other].rent_income, 600.0);
        assert_eq!(days[&PaymentMethod::Other].total_income(), 600.0);
    }

    #[test]
    fn test_methods_are_isolated() {
        let bills = [
            settlement(PaymentMethod::Cash, StayType::Overnight, 200.0, 0.0),
            settlement(PaymentMethod::Digital, StayType::Overnight, 500.0, 0.0),
        ];
        let days = compute_day(
            &BTreeMap::new(),
            &bills,
            &BTreeMap::new(),
            &HandoverConfig::default(),
        );
        assert_eq!(days[&PaymentMethod::Cash].room_income, 200.0);
        assert_eq!(days[&PaymentMethod::Digital].room_income, 500.0);
        assert_eq!(days[&PaymentMethod::Wechat].room_income, 0.0);
    }

    #[test]
    fn test_cancelled_order_settlement_not_billable() {
        assert!(!counts_for_day(ChangeType::Settlement, true));
        assert!(counts_for_day(ChangeType::Settlement, false));
        // 已退出去的押金照常扣账
        assert!(counts_for_day(ChangeType::DepositRefund, true));
    }

    #[test]
    fn test_change_type_round_trip() {
        assert_eq!(ChangeType::parse("订单账单"), Some(ChangeType::Settlement));
        assert_eq!(ChangeType::parse("退押"), Some(ChangeType::DepositRefund));
        assert_eq!(ChangeType::parse("调整"), None);
    }
}
