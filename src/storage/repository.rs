use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any, sql::Datetime};

use crate::error::{AppError, Result};
use crate::models::meme::{MEME_TABLE, Meme};

/// Meme 仓储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemeRepository: Send + Sync {
    /// 按创建时间倒序列出最多 `limit` 条记录
    async fn list_recent(&self, limit: usize) -> Result<Vec<Meme>>;

    /// 批量插入，返回插入条数
    async fn insert_many(&self, memes: Vec<Meme>) -> Result<usize>;

    /// 创建单条记录
    async fn create(&self, meme: Meme) -> Result<Meme>;
}

/// 存储中的文档形态，`created_at` 使用 SurrealDB 原生 datetime 以保证排序正确
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemeDocument {
    title: String,
    src: String,
    created_at: Datetime,
}

impl From<Meme> for MemeDocument {
    fn from(meme: Meme) -> Self {
        Self {
            title: meme.title,
            src: meme.src,
            created_at: Datetime::from(meme.created_at),
        }
    }
}

impl From<MemeDocument> for Meme {
    fn from(doc: MemeDocument) -> Self {
        Meme::with_created_at(doc.title, doc.src, doc.created_at.0)
    }
}

/// SurrealDB 实现
#[derive(Clone)]
pub struct SurrealMemeRepository {
    db: Surreal<Any>,
}

impl SurrealMemeRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemeRepository for SurrealMemeRepository {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Meme>> {
        let docs: Vec<MemeDocument> = self
            .db
            .query("SELECT title, src, created_at FROM type::table($table) ORDER BY created_at DESC LIMIT $limit")
            .bind(("table", MEME_TABLE))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(docs.into_iter().map(Meme::from).collect())
    }

    async fn insert_many(&self, memes: Vec<Meme>) -> Result<usize> {
        let docs: Vec<MemeDocument> = memes.into_iter().map(MemeDocument::from).collect();
        let inserted: Vec<MemeDocument> = self.db.insert(MEME_TABLE).content(docs).await?;
        Ok(inserted.len())
    }

    async fn create(&self, meme: Meme) -> Result<Meme> {
        let title = meme.title.clone();
        let created: Option<MemeDocument> = self
            .db
            .create(MEME_TABLE)
            .content(MemeDocument::from(meme))
            .await?;

        created
            .map(Meme::from)
            .ok_or_else(|| AppError::Database(format!("Failed to create meme: {}", title)))
    }
}
