pub mod phone;

pub use phone::validate_cn_phone;
