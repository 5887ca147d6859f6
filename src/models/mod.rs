pub mod bill;
pub mod common;
pub mod handover;
pub mod order;
pub mod pagination;
pub mod room;

pub use bill::*;
pub use common::*;
pub use handover::*;
pub use order::*;
pub use pagination::*;
pub use room::*;
