//! Meme DTO
//!
//! 定义 Meme 相关的请求和响应数据结构。

use serde::Deserialize;

pub use crate::models::meme::MemeView as MemeResponse;

/// 创建 Meme 请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMemeRequest {
    /// 标题
    pub title: Option<String>,
    /// 图片地址
    pub src: Option<String>,
}
