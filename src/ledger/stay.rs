use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 订单状态，数据库中以中文字符串存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "待入住")]
    Pending,
    #[serde(rename = "已入住")]
    CheckedIn,
    #[serde(rename = "已退房")]
    CheckedOut,
    #[serde(rename = "已取消")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "待入住",
            OrderStatus::CheckedIn => "已入住",
            OrderStatus::CheckedOut => "已退房",
            OrderStatus::Cancelled => "已取消",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "待入住" => Some(OrderStatus::Pending),
            "已入住" => Some(OrderStatus::CheckedIn),
            "已退房" => Some(OrderStatus::CheckedOut),
            "已取消" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// 终态订单不再占用房间，也不可再变更状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::CheckedOut | OrderStatus::Cancelled)
    }

    /// 状态机转移表：待入住→已入住→已退房；待入住→已取消
    pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (OrderStatus::Pending, OrderStatus::CheckedIn)
                | (OrderStatus::CheckedIn, OrderStatus::CheckedOut)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

/// 客房（过夜）/ 休息房（当日）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StayType {
    #[serde(rename = "客房")]
    Overnight,
    #[serde(rename = "休息房")]
    RestRoom,
}

impl StayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayType::Overnight => "客房",
            StayType::RestRoom => "休息房",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "客房" => Some(StayType::Overnight),
            "休息房" => Some(StayType::RestRoom),
            _ => None,
        }
    }

    /// stay_type 是入住/退房日期的纯函数，不信任客户端传值
    pub fn of_dates(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        if check_in == check_out {
            StayType::RestRoom
        } else {
            StayType::Overnight
        }
    }
}

/// 支付方式，交接班按此分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "现金")]
    Cash,
    #[serde(rename = "微信")]
    Wechat,
    #[serde(rename = "微邮付")]
    Digital,
    #[serde(rename = "其他")]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Wechat,
        PaymentMethod::Digital,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "现金",
            PaymentMethod::Wechat => "微信",
            PaymentMethod::Digital => "微邮付",
            PaymentMethod::Other => "其他",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "现金" => Some(PaymentMethod::Cash),
            "微信" => Some(PaymentMethod::Wechat),
            "微邮付" => Some(PaymentMethod::Digital),
            "其他" => Some(PaymentMethod::Other),
            _ => None,
        }
    }

    /// 历史数据中出现过的方式名不规范，统一归入"其他"
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or(PaymentMethod::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_stay_type_of_dates() {
        assert_eq!(
            StayType::of_dates(d("2025-06-20"), d("2025-06-20")),
            StayType::RestRoom
        );
        assert_eq!(
            StayType::of_dates(d("2025-06-15"), d("2025-06-17")),
            StayType::Overnight
        );
        assert_eq!(
            StayType::of_dates(d("2025-06-15"), d("2025-06-16")),
            StayType::Overnight
        );
    }

    #[test]
    fn test_transition_table() {
        use OrderStatus::*;
        let legal = [(Pending, CheckedIn), (CheckedIn, CheckedOut), (Pending, Cancelled)];
        for from in [Pending, CheckedIn, CheckedOut, Cancelled] {
            for to in [Pending, CheckedIn, CheckedOut, Cancelled] {
                assert_eq!(
                    OrderStatus::can_transition(from, to),
                    legal.contains(&(from, to)),
                    "{from:?} -> {to:?}"
                );
            }
        }
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["待入住", "已入住", "已退房", "已取消"] {
            assert_eq!(OrderStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(OrderStatus::parse("退房中").is_none());
    }

    #[test]
    fn test_payment_method_lossy() {
        assert_eq!(PaymentMethod::parse_lossy("现金"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse_lossy("支付宝"), PaymentMethod::Other);
    }
}
