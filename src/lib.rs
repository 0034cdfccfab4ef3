//! Meme Gallery - Meme 读取与种子服务
//!
//! 为问候页面的画廊提供数据：连接 SurrealDB，未配置或不可达时退回内置默认数据，
//! 首次读取空集合时写入默认数据。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
