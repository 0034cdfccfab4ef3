//! Meme Routes
//!
//! 定义画廊相关的 API 路由。

use crate::api::handlers::meme_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建 Meme 路由器
pub fn create_meme_router() -> Router<AppState> {
    Router::new()
        .route("/memes", get(list_memes).post(create_meme))
        .route("/memes/", get(list_memes).post(create_meme))
}
