pub mod bill;
pub mod handover;
pub mod order;
pub mod room;

pub use bill::bill_config;
pub use handover::handover_config;
pub use order::order_config;
pub use room::room_config;
