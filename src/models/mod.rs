//! 核心数据模型模块
//!
//! 定义 Meme 记录、对外视图与默认数据集。

pub mod meme;

pub use meme::*;
