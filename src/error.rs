use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 业务错误统一类型；每个业务错误携带稳定的机器可读 code
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("[{code}] {message}")]
    ValidationError { code: &'static str, message: String },

    #[error("[{code}] {message}")]
    ConflictError { code: &'static str, message: String },

    #[error("[{code}] {message}")]
    NotFound { code: &'static str, message: String },

    #[error("[{code}] {message}")]
    StateError { code: &'static str, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::ConflictError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn state(code: &'static str, message: impl Into<String>) -> Self {
        Self::StateError {
            code,
            message: message.into(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError { code, message } => {
                log::warn!("Validation error [{code}]: {message}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    *code,
                    message.clone(),
                )
            }
            AppError::ConflictError { code, message } => {
                log::warn!("Conflict [{code}]: {message}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    *code,
                    message.clone(),
                )
            }
            AppError::NotFound { code, message } => (
                actix_web::http::StatusCode::NOT_FOUND,
                *code,
                message.clone(),
            ),
            AppError::StateError { code, message } => {
                log::warn!("State error [{code}]: {message}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    *code,
                    message.clone(),
                )
            }
            AppError::DatabaseError(err) => {
                // 存储错误不向调用方泄露内部细节
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
