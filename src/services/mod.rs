pub mod bill_service;
pub mod handover_service;
pub mod order_service;
pub mod room_service;

pub use bill_service::*;
pub use handover_service::*;
pub use order_service::*;
pub use room_service::*;
