//! API 模块
//!
//! 提供 REST API 支持，所有路由挂载在 `/api` 下。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 路由前缀
pub const API_PREFIX: &str = "/api";

pub fn create_router(app_state: AppState, max_request_size: usize) -> Router {
    let api = Router::new().merge(routes::meme_routes::create_meme_router());

    Router::new()
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
