pub mod bills;
pub mod handover_records;
pub mod order_audits;
pub mod orders;
pub mod room_types;
pub mod rooms;

pub use bills as bill_entity;
pub use handover_records as handover_record_entity;
pub use order_audits as order_audit_entity;
pub use orders as order_entity;
pub use room_types as room_type_entity;
pub use rooms as room_entity;
