//! 存储层模块
//!
//! 提供数据持久化服务：SurrealDB 仓储与进程级连接缓存。

pub mod repository;
pub mod surrealdb;

pub use repository::{MemeRepository, SurrealMemeRepository};
pub use self::surrealdb::{ConnectionCache, StoreConnector, SurrealConnector};
