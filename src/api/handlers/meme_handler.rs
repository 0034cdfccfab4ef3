use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::meme_dto::*},
    error::AppError,
};

pub async fn list_memes(State(state): State<AppState>) -> impl IntoResponse {
    let memes: Vec<MemeResponse> = state.gallery_service.list().await;
    debug!("Listing memes: {} returned", memes.len());
    Json(memes)
}

/// 无法解析的请求体按空请求处理，由服务层给出缺失字段错误；
/// 超过大小限制的请求体直接返回 413。
pub async fn create_meme(
    State(state): State<AppState>,
    payload: Result<Json<CreateMemeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            debug!("Meme body rejected: {}", rejection);
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            debug!("Unreadable meme body, treating as empty: {}", rejection);
            CreateMemeRequest::default()
        }
    };

    let created = state
        .gallery_service
        .create(
            request.title.unwrap_or_default(),
            request.src.unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
