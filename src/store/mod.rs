//! 键值状态存储. 整个通知列表以一个 JSON 字符串保存在单个键下
use async_trait::async_trait;
use derive_more::Display;
use std::sync::Arc;
use std::time::Duration;

mod memory;
mod pgsql;

pub use memory::MemoryStateStore;
pub use pgsql::PgStateStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "获取数据库连接失败: {}", _0)]
    Pool(String),
    #[display(fmt = "查询数据库错误: {}", _0)]
    Query(String),
    #[display(fmt = "存储配置错误: {}", _0)]
    Config(String),
}

impl std::error::Error for StoreError {}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(error: deadpool_postgres::PoolError) -> Self {
        Self::Pool(error.to_string())
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(error: tokio_postgres::Error) -> Self {
        Self::Query(error.to_string())
    }
}

#[async_trait]
pub trait StateStore: Send + Sync {
    /// 不存在或已过期时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// `ttl` 为 `None` 时由存储决定保存时长
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;
}

pub type SharedStateStore = Arc<dyn StateStore>;
