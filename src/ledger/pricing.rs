use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 按日房价表，键为 YYYY-MM-DD
pub type PriceMap = BTreeMap<String, f64>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("房价不能为空")]
    EmptyPrice,

    #[error("{date} 的房价无效: {value}")]
    NonPositivePrice { date: String, value: f64 },

    #[error("房价日期格式无效: {0}")]
    BadDateFormat(String),

    #[error("房价首日 {found} 与入住日期 {expected} 不符")]
    StartMismatch { expected: NaiveDate, found: NaiveDate },

    #[error("房价天数不符: 应为 {expected} 天, 实际 {found} 天")]
    LengthMismatch { expected: usize, found: usize },

    #[error("房价日期不连续: {0}")]
    DiscontinuousDates(NaiveDate),
}

/// 应计费的夜晚集合：休息房只有入住当日；过夜房为 [入住, 退房) 的每一天
pub fn billable_nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    if check_in == check_out {
        return vec![check_in];
    }
    let mut nights = Vec::new();
    let mut day = check_in;
    while day < check_out {
        nights.push(day);
        day += Duration::days(1);
    }
    nights
}

/// 校验房价表与入住/退房日期完全吻合；纯函数，无副作用
pub fn validate(
    price_map: &PriceMap,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<(), PricingError> {
    if price_map.is_empty() {
        return Err(PricingError::EmptyPrice);
    }

    // 键必须是严格的 YYYY-MM-DD；宽松写法（2025-6-1）一律拒绝
    let mut dates = Vec::with_capacity(price_map.len());
    for (key, value) in price_map {
        let date = NaiveDate::parse_from_str(key, DATE_FORMAT)
            .map_err(|_| PricingError::BadDateFormat(key.clone()))?;
        if date.format(DATE_FORMAT).to_string() != *key {
            return Err(PricingError::BadDateFormat(key.clone()));
        }
        if !value.is_finite() || *value <= 0.0 {
            return Err(PricingError::NonPositivePrice {
                date: key.clone(),
                value: *value,
            });
        }
        dates.push(date);
    }
    dates.sort();

    let expected = billable_nights(check_in, check_out);
    if dates.len() != expected.len() {
        return Err(PricingError::LengthMismatch {
            expected: expected.len(),
            found: dates.len(),
        });
    }
    if dates[0] != check_in {
        return Err(PricingError::StartMismatch {
            expected: check_in,
            found: dates[0],
        });
    }
    for (actual, want) in dates.iter().zip(expected.iter()) {
        if actual != want {
            return Err(PricingError::DiscontinuousDates(*actual));
        }
    }
    Ok(())
}

/// 客户端传入单一价格时，按应计费夜晚展开成房价表
pub fn expand_scalar(price: f64, check_in: NaiveDate, check_out: NaiveDate) -> PriceMap {
    billable_nights(check_in, check_out)
        .into_iter()
        .map(|d| (d.format(DATE_FORMAT).to_string(), price))
        .collect()
}

/// 账单归属日：房价表最早的日期，解析不出时退回入住日期
pub fn stay_date(price_map: &PriceMap, check_in: NaiveDate) -> NaiveDate {
    price_map
        .keys()
        .filter_map(|k| NaiveDate::parse_from_str(k, DATE_FORMAT).ok())
        .min()
        .unwrap_or(check_in)
}

/// 房费合计
pub fn room_fee(price_map: &PriceMap) -> f64 {
    price_map.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn map(entries: &[(&str, f64)]) -> PriceMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_two_night_stay_accepted() {
        let m = map(&[("2025-06-15", 220.0), ("2025-06-16", 250.0)]);
        assert_eq!(validate(&m, d("2025-06-15"), d("2025-06-17")), Ok(()));
    }

    #[test]
    fn test_rest_room_accepted() {
        let m = map(&[("2025-06-20", 150.0)]);
        assert_eq!(validate(&m, d("2025-06-20"), d("2025-06-20")), Ok(()));
    }

    #[test]
    fn test_one_night_excludes_checkout_date() {
        let m = map(&[("2025-06-15", 220.0)]);
        assert_eq!(validate(&m, d("2025-06-15"), d("2025-06-16")), Ok(()));

        // 键写成退房日是错的
        let m = map(&[("2025-06-16", 220.0)]);
        assert_eq!(
            validate(&m, d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::StartMismatch {
                expected: d("2025-06-15"),
                found: d("2025-06-16"),
            })
        );
    }

    #[test]
    fn test_length_mismatch() {
        // 3 晚只给了 2 天价格
        let m = map(&[("2025-07-05", 200.0), ("2025-07-06", 220.0)]);
        assert_eq!(
            validate(&m, d("2025-07-05"), d("2025-07-08")),
            Err(PricingError::LengthMismatch {
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_discontinuous_dates() {
        let m = map(&[
            ("2025-07-05", 200.0),
            ("2025-07-07", 220.0), // 缺 07-06
        ]);
        assert_eq!(
            validate(&m, d("2025-07-05"), d("2025-07-07")),
            Err(PricingError::DiscontinuousDates(d("2025-07-07")))
        );
    }

    #[test]
    fn test_shifted_by_one_day_rejected() {
        let m = map(&[("2025-06-16", 220.0), ("2025-06-17", 250.0)]);
        assert!(validate(&m, d("2025-06-15"), d("2025-06-17")).is_err());
    }

    #[test]
    fn test_empty_and_non_positive() {
        assert_eq!(
            validate(&PriceMap::new(), d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::EmptyPrice)
        );
        let m = map(&[("2025-06-15", 0.0)]);
        assert!(matches!(
            validate(&m, d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::NonPositivePrice { .. })
        ));
        let m = map(&[("2025-06-15", -10.0)]);
        assert!(matches!(
            validate(&m, d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn test_strict_date_format() {
        let m = map(&[("2025-6-15", 220.0)]);
        assert_eq!(
            validate(&m, d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::BadDateFormat("2025-6-15".to_string()))
        );
        let m = map(&[("15/06/2025", 220.0)]);
        assert!(matches!(
            validate(&m, d("2025-06-15"), d("2025-06-16")),
            Err(PricingError::BadDateFormat(_))
        ));
    }

    #[test]
    fn test_round_trip_with_generator() {
        // 任意有效日期区间上，由 billable_nights 生成的表必然通过校验
        for (check_in, check_out) in [
            ("2025-06-20", "2025-06-20"),
            ("2025-06-15", "2025-06-16"),
            ("2025-06-15", "2025-06-17"),
            ("2025-12-30", "2026-01-02"),
        ] {
            let (ci, co) = (d(check_in), d(check_out));
            let m = expand_scalar(188.0, ci, co);
            assert_eq!(validate(&m, ci, co), Ok(()), "{check_in}..{check_out}");

            // 多加一天必然失败
            let mut extra = m.clone();
            let next = co + chrono::Duration::days(3);
            extra.insert(next.format(DATE_FORMAT).to_string(), 188.0);
            assert!(validate(&extra, ci, co).is_err());
        }
    }

    #[test]
    fn test_stay_date_derivation() {
        let m = map(&[("2025-06-16", 250.0), ("2025-06-15", 220.0)]);
        assert_eq!(stay_date(&m, d("2025-01-01")), d("2025-06-15"));
        // 解析不出任何键时退回入住日期
        let m = map(&[("garbage", 100.0)]);
        assert_eq!(stay_date(&m, d("2025-06-15")), d("2025-06-15"));
    }

    #[test]
    fn test_room_fee_sum() {
        let m = map(&[("2025-06-15", 220.0), ("2025-06-16", 250.0)]);
        assert_eq!(room_fee(&m), 470.0);
    }
}
