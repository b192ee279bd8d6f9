//! warehouse-errors - 统一错误处理
//!
//! 报表服务对外只暴露三种错误形态：
//! - 参数错误：400 + `{"message": ...}`
//! - 无数据：404 + `{"message": ...}`
//! - 其余一切：500 + 固定文本 `Internal Server Error`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// 500 响应的固定文本
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 客户端可见的消息（不含前缀）
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON 错误体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::NotFound(message) | Self::Validation(message) => {
                (status, Json(ErrorMessage { message })).into_response()
            }
            Self::Database(_) | Self::Internal(_) => {
                // 细节只进日志，不回给客户端
                error!(error = %self, "Request failed");
                (status, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
