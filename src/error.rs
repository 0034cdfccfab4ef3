//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::loader::ConfigValidationError;

/// 应用程序错误类型
///
/// 需要 `Clone`：同一次连接尝试的结果会分发给所有并发等待者。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 未配置存储（写路径）
    #[error("Meme store not configured. Set GALLERY_DATABASE__URL to enable persistence.")]
    NotConfigured,

    /// 参数验证错误
    #[error("{0}")]
    Validation(String),

    /// 连接错误
    #[error("connection error: {0}")]
    Connection(String),

    /// 数据库错误
    #[error("database error: {0}")]
    Database(String),

    /// 请求体超过大小限制
    #[error("Request body too large")]
    PayloadTooLarge,

    /// 写入失败（对调用方只暴露通用信息）
    #[error("Failed to create meme")]
    CreateFailed,

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    /// IO 错误
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<ConfigValidationError> for AppError {
    fn from(e: ConfigValidationError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(e: surrealdb::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl AppError {
    /// HTTP 状态码映射
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotConfigured | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的消息，内部错误细节不外泄
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotConfigured
            | AppError::Validation(_)
            | AppError::PayloadTooLarge
            | AppError::CreateFailed => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(&self.public_message()));
        (self.status_code(), body).into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误消息
    pub error: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
