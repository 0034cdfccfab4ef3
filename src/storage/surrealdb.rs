use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::storage::repository::{MemeRepository, SurrealMemeRepository};
use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::Arc;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};
use tracing::{info, warn};

/// 存储连接器
///
/// 负责建立一次连接并返回可共享的仓储句柄。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn MemeRepository>>;
}

/// SurrealDB 连接器
#[derive(Debug, Clone)]
pub struct SurrealConnector {
    /// 连接地址
    url: String,
    /// 连接配置
    config: DatabaseConfig,
}

impl SurrealConnector {
    pub fn new(url: impl Into<String>, config: DatabaseConfig) -> Self {
        Self {
            url: url.into(),
            config,
        }
    }

    async fn open(&self) -> std::result::Result<Surreal<Any>, surrealdb::Error> {
        let db: Surreal<Any> = connect(self.url.as_str()).await?;

        // 认证（可选）
        if let Some(username) = self.config.username.as_deref().filter(|u| !u.is_empty()) {
            db.signin(Root {
                username,
                password: self.config.password.as_deref().unwrap_or_default(),
            })
            .await?;
        }

        // 选择命名空间和数据库
        db.use_ns(self.config.namespace.as_str())
            .use_db(self.config.database_name())
            .await?;

        Ok(db)
    }
}

#[async_trait]
impl StoreConnector for SurrealConnector {
    async fn connect(&self) -> Result<Arc<dyn MemeRepository>> {
        let db = self
            .open()
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;

        info!(
            namespace = %self.config.namespace,
            database = %self.config.database_name(),
            "Meme store connection established"
        );
        Ok(Arc::new(SurrealMemeRepository::new(db)))
    }
}

type ConnectOutcome = std::result::Result<Arc<dyn MemeRepository>, AppError>;
type ConnectAttempt = Shared<BoxFuture<'static, ConnectOutcome>>;

enum CacheState {
    Idle,
    Connecting {
        generation: u64,
        attempt: ConnectAttempt,
    },
    Ready(Arc<dyn MemeRepository>),
}

struct CacheInner {
    state: CacheState,
    generation: u64,
}

/// 连接缓存
///
/// 每个进程最多持有一个存储句柄，首次使用时建立。并发的首次调用共享同一次
/// 连接尝试；失败后回到空闲状态，下一次调用会重新尝试。克隆后共享同一状态。
#[derive(Clone)]
pub struct ConnectionCache {
    connector: Option<Arc<dyn StoreConnector>>,
    inner: Arc<Mutex<CacheInner>>,
}

impl std::fmt::Debug for ConnectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionCache")
            .field("configured", &self.is_configured())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl ConnectionCache {
    /// 根据配置创建；未配置连接地址时进入仅默认数据模式
    pub fn from_config(config: &DatabaseConfig) -> Self {
        match config.target() {
            Some(url) => Self::with_connector(Arc::new(SurrealConnector::new(url, config.clone()))),
            None => Self::disabled(),
        }
    }

    /// 使用自定义连接器
    pub fn with_connector(connector: Arc<dyn StoreConnector>) -> Self {
        Self::build(Some(connector))
    }

    /// 未配置存储
    pub fn disabled() -> Self {
        Self::build(None)
    }

    fn build(connector: Option<Arc<dyn StoreConnector>>) -> Self {
        Self {
            connector,
            inner: Arc::new(Mutex::new(CacheInner {
                state: CacheState::Idle,
                generation: 0,
            })),
        }
    }

    /// 是否配置了连接目标
    pub fn is_configured(&self) -> bool {
        self.connector.is_some()
    }

    /// 是否已持有可用句柄
    pub fn is_connected(&self) -> bool {
        matches!(self.inner.lock().state, CacheState::Ready(_))
    }

    /// 获取存储句柄
    ///
    /// 未配置时返回 `Ok(None)`，这不是错误。
    pub async fn acquire(&self) -> Result<Option<Arc<dyn MemeRepository>>> {
        let Some(connector) = &self.connector else {
            return Ok(None);
        };

        let (generation, attempt) = {
            let mut inner = self.inner.lock();
            let pending = match &inner.state {
                CacheState::Ready(handle) => return Ok(Some(Arc::clone(handle))),
                CacheState::Connecting {
                    generation,
                    attempt,
                } => Some((*generation, attempt.clone())),
                CacheState::Idle => None,
            };

            match pending {
                Some(pending) => pending,
                None => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let connector = Arc::clone(connector);
                    let attempt = async move { connector.connect().await }.boxed().shared();
                    inner.state = CacheState::Connecting {
                        generation,
                        attempt: attempt.clone(),
                    };
                    (generation, attempt)
                }
            }
        };

        let outcome = attempt.await;

        let mut inner = self.inner.lock();
        let current = matches!(
            &inner.state,
            CacheState::Connecting { generation: g, .. } if *g == generation
        );
        if current {
            inner.state = match &outcome {
                Ok(handle) => CacheState::Ready(Arc::clone(handle)),
                Err(e) => {
                    warn!(error = %e, "Meme store connection failed, next call will retry");
                    CacheState::Idle
                }
            };
        }

        outcome.map(Some)
    }
}
