//! 可观测性模块
//!
//! 提供结构化日志初始化和健康检查。

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};
use crate::storage::surrealdb::ConnectionCache;

// ===== Health Checks =====

/// 健康状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    /// `configured` 或 `defaults-only`
    pub store: String,
    pub connected: bool,
    pub version: String,
    pub uptime_seconds: f64,
}

/// 可观测性状态
#[derive(Debug, Clone)]
pub struct ObservabilityState {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub cache: ConnectionCache,
}

impl ObservabilityState {
    pub fn new(version: impl Into<String>, cache: ConnectionCache) -> Self {
        Self {
            version: version.into(),
            started_at: Utc::now(),
            cache,
        }
    }

    /// 获取运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn health(&self) -> HealthStatus {
        let store = if self.cache.is_configured() {
            "configured"
        } else {
            "defaults-only"
        };

        // 读路径总能返回数据，存储状态只做展示
        HealthStatus {
            status: "ok".to_string(),
            store: store.to_string(),
            connected: self.cache.is_connected(),
            version: self.version.clone(),
            uptime_seconds: self.uptime_seconds(),
        }
    }
}

/// 健康检查端点
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(state.health())
}

/// 存活检查
pub async fn liveness() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的日志级别。
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Config(format!("failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_health_reports_defaults_only() {
        let state = ObservabilityState::new("0.1.0", ConnectionCache::disabled());
        let health = state.health();

        assert_eq!(health.status, "ok");
        assert_eq!(health.store, "defaults-only");
        assert!(!health.connected);
        assert_eq!(health.version, "0.1.0");
    }

    #[test]
    fn test_second_tracing_init_is_config_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = Arc::new(ObservabilityState::new("0.1.0", ConnectionCache::disabled()));
        let app = create_observability_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["store"], "defaults-only");
    }
}
