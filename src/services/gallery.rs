//! 画廊服务
//!
//! 提供 Meme 的读取与创建。读路径优先可用性：任何存储故障都退回默认数据集；
//! 写路径优先正确性：失败必须告知调用方。

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::meme::{Meme, MemeView, default_memes, seed_batch, validate_new_meme};
use crate::storage::repository::MemeRepository;
use crate::storage::surrealdb::ConnectionCache;

/// 单次列表返回的最大条数
pub const LIST_LIMIT: usize = 50;

/// 画廊服务 trait
#[async_trait]
pub trait GalleryService: Send + Sync {
    /// 按创建时间倒序列出 Meme，永不失败
    async fn list(&self) -> Vec<MemeView>;

    /// 创建 Meme；空字符串视为缺失
    async fn create(&self, title: String, src: String) -> Result<MemeView>;
}

/// 读路径的数据来源
enum MemeSource {
    /// 主存储
    Store(Arc<dyn MemeRepository>),
    /// 内存中的默认数据集
    Defaults,
}

/// 画廊服务实现
pub struct GalleryServiceImpl {
    cache: ConnectionCache,
}

impl GalleryServiceImpl {
    /// 创建新的服务实例
    pub fn new(cache: ConnectionCache) -> Self {
        Self { cache }
    }

    async fn resolve_source(&self) -> MemeSource {
        match self.cache.acquire().await {
            Ok(Some(repository)) => MemeSource::Store(repository),
            Ok(None) => MemeSource::Defaults,
            Err(e) => {
                warn!(error = %e, "Meme store unreachable, serving default memes");
                MemeSource::Defaults
            }
        }
    }

    /// 读取最新记录；集合为空时写入默认数据后重新读取。
    ///
    /// 并发的首次读取可能各自写入一次默认数据，这里不做去重。
    async fn list_or_seed(repository: &dyn MemeRepository) -> Result<Vec<Meme>> {
        let memes = repository.list_recent(LIST_LIMIT).await?;
        if !memes.is_empty() {
            return Ok(memes);
        }

        let seeded = repository.insert_many(seed_batch(Utc::now())).await?;
        info!(seeded, "Meme collection was empty, seeded default memes");

        repository.list_recent(LIST_LIMIT).await
    }
}

#[async_trait]
impl GalleryService for GalleryServiceImpl {
    async fn list(&self) -> Vec<MemeView> {
        let repository = match self.resolve_source().await {
            MemeSource::Store(repository) => repository,
            MemeSource::Defaults => return default_memes(),
        };

        match Self::list_or_seed(repository.as_ref()).await {
            Ok(memes) => {
                debug!(count = memes.len(), "Listed memes from store");
                memes.into_iter().map(MemeView::from).collect()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read memes, serving default memes");
                default_memes()
            }
        }
    }

    async fn create(&self, title: String, src: String) -> Result<MemeView> {
        let repository = match self.cache.acquire().await {
            Ok(Some(repository)) => repository,
            Ok(None) => return Err(AppError::NotConfigured),
            Err(e) => {
                error!(error = %e, "Meme store unreachable, cannot create meme");
                return Err(AppError::CreateFailed);
            }
        };

        validate_new_meme(&title, &src)?;

        let created = repository
            .create(Meme::new(title, src))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to insert meme");
                AppError::CreateFailed
            })?;

        debug!(title = %created.title, "Meme created");
        Ok(MemeView::from(created))
    }
}

/// 创建画廊服务
pub fn create_gallery_service(cache: ConnectionCache) -> Box<dyn GalleryService> {
    Box::new(GalleryServiceImpl::new(cache))
}
