use crate::error::{AppError, AppResult};
use regex::Regex;

/// 验证大陆 11 位手机号格式
pub fn validate_cn_phone(phone: &str) -> AppResult<()> {
    let phone_regex = Regex::new(r"^1[3-9]\d{9}$").unwrap();

    if !phone_regex.is_match(phone) {
        return Err(AppError::validation(
            "INVALID_PHONE",
            format!("手机号格式无效: {phone}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cn_phone() {
        assert!(validate_cn_phone("13812345678").is_ok());
        assert!(validate_cn_phone("19912345678").is_ok());
        assert!(validate_cn_phone("12812345678").is_err()); // 第二位不合法
        assert!(validate_cn_phone("1381234567").is_err()); // 少一位
        assert!(validate_cn_phone("138123456789").is_err()); // 多一位
        assert!(validate_cn_phone("+8613812345678").is_err());
        assert!(validate_cn_phone("").is_err());
    }
}
