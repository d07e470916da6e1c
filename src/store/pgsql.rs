use async_trait::async_trait;
use deadpool_postgres::{Client, Pool};
use std::time::Duration;

use super::{StateStore, StoreError};
use crate::db::Type as DBType;

/// 以 PostgreSQL 表保存键值, 过期的行在读取时视为不存在
pub struct PgStateStore {
    pool: Pool,
}

impl PgStateStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let client: Client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS state_kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    expires_at TIMESTAMPTZ
                )",
            )
            .await?;
        tracing::info!("状态存储表已就绪");
        Ok(())
    }
}

#[async_trait]
impl StateStore for PgStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let client: Client = self.pool.get().await?;
        let s1 = client
            .prepare_typed_cached(
                "SELECT value FROM state_kv
                WHERE key = $1 AND (expires_at IS NULL OR expires_at > now())",
                &[DBType::TEXT],
            )
            .await?;
        let r1 = client.query_opt(&s1, &[&key]).await?;
        Ok(r1.map(|row| row.get("value")))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let client: Client = self.pool.get().await?;
        let s1 = client
            .prepare_typed_cached(
                "INSERT INTO state_kv(key, value, expires_at)
                VALUES($1, $2, CASE WHEN $3::float8 IS NULL THEN NULL
                    ELSE now() + make_interval(secs => $3::float8) END)
                ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at",
                &[DBType::TEXT, DBType::TEXT, DBType::FLOAT8],
            )
            .await?;
        let ttl_secs: Option<f64> = ttl.map(|t| t.as_secs_f64());
        client.execute(&s1, &[&key, &value, &ttl_secs]).await?;
        Ok(())
    }
}
