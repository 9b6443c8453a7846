use axum::Json;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::translation::TranslateError;

/// HTTP 边界上的错误，统一转换成 `{ "error": ... }`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("bad request: {0}")]
    Validation(String),
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        usage: Option<Value>,
    },
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    /// 面向调用方的通用提示，具体原因已在上游记录
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<Value>,
}

impl AppError {
    /// 上游错误只记录日志，对外替换成 `fallback`
    pub fn from_translate(err: TranslateError, fallback: &str) -> Self {
        match err {
            TranslateError::Configuration(message) => {
                error!("OpenAI credentials are not configured");
                AppError::Configuration(message)
            }
            TranslateError::Validation(message) => AppError::Validation(message),
            TranslateError::QuotaExceeded { message, usage } => AppError::QuotaExceeded {
                message,
                usage: usage.map(|snapshot| snapshot.report),
            },
            other => {
                error!("Upstream call failed: {}", other);
                AppError::Internal(fallback.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        AppError::Validation("요청 본문이 올바르지 않습니다.".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection);
        AppError::Validation("잘못된 ID입니다.".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, usage) = match self {
            AppError::Configuration(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message, None),
            AppError::QuotaExceeded { message, usage } => {
                (StatusCode::TOO_MANY_REQUESTS, message, usage)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "인증이 필요합니다.".into(), None),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "요청한 항목을 찾을 수 없습니다.".into(),
                None,
            ),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message, None),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "데이터베이스 오류가 발생했습니다.".into(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error, usage })).into_response()
    }
}
