//! 台账核心：纯函数规则层，不做任何 I/O，可脱离数据库测试。

pub mod availability;
pub mod deposit;
pub mod handover;
pub mod pricing;
pub mod stay;

pub use availability::{ConflictKind, StaySpan, find_conflict};
pub use pricing::{PriceMap, PricingError};
pub use stay::{OrderStatus, PaymentMethod, StayType};
