use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// 存储表名
pub const MEME_TABLE: &str = "meme";

/// 默认数据集：未配置存储、存储不可达或读取失败时使用
pub const DEFAULT_MEMES: [(&str, &str); 3] = [
    ("Cuddle mode: ON 😽", "/date1.jpeg"),
    ("A heart just for you 💗", "/date2.png"),
    ("Officially your Valentine 🥺", "/date3.jpeg"),
];

/// Meme 记录
///
/// `src` 可以是绝对 URL，也可以是 `/date1.jpeg` 这样的站内路径。
#[derive(Debug, Clone, PartialEq)]
pub struct Meme {
    /// 标题
    pub title: String,
    /// 图片地址
    pub src: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Meme {
    /// 创建新记录，创建时间为当前时间
    pub fn new(title: impl Into<String>, src: impl Into<String>) -> Self {
        Self::with_created_at(title, src, Utc::now())
    }

    pub fn with_created_at(
        title: impl Into<String>,
        src: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            src: src.into(),
            created_at,
        }
    }
}

/// 对外暴露的 Meme，只包含 `title` 和 `src`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeView {
    pub title: String,
    pub src: String,
}

impl From<&Meme> for MemeView {
    fn from(meme: &Meme) -> Self {
        Self {
            title: meme.title.clone(),
            src: meme.src.clone(),
        }
    }
}

impl From<Meme> for MemeView {
    fn from(meme: Meme) -> Self {
        Self {
            title: meme.title,
            src: meme.src,
        }
    }
}

/// 默认数据集的对外形式，顺序固定
pub fn default_memes() -> Vec<MemeView> {
    DEFAULT_MEMES
        .iter()
        .map(|(title, src)| MemeView {
            title: (*title).to_string(),
            src: (*src).to_string(),
        })
        .collect()
}

/// 生成种子数据
///
/// 创建时间从 `now` 开始逐条递减 1ms，按创建时间倒序读取时与 `DEFAULT_MEMES` 顺序一致。
pub fn seed_batch(now: DateTime<Utc>) -> Vec<Meme> {
    DEFAULT_MEMES
        .iter()
        .zip(0i64..)
        .map(|((title, src), offset)| {
            Meme::with_created_at(*title, *src, now - Duration::milliseconds(offset))
        })
        .collect()
}

/// 校验新建请求的必填字段
pub fn validate_new_meme(title: &str, src: &str) -> Result<()> {
    let missing: Vec<&str> = [("title", title), ("src", src)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing {}",
            missing.join(" and ")
        )))
    }
}
