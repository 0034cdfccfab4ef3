//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod meme_handler;

pub use meme_handler::*;
