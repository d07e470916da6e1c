use std::time::Duration;

use crate::config::StoreConfig;
use crate::model::notification::NotificationList;
use crate::service::NotificationError;
use crate::store::SharedStateStore;

/// 读写保存在单个键下的整个通知列表
pub struct NotificationRepository {
    store: SharedStateStore,
    key: String,
    ttl: Option<Duration>,
    strict_decode: bool,
}

impl NotificationRepository {
    pub fn new(store: SharedStateStore, config: &StoreConfig) -> Self {
        Self {
            store,
            key: config.key.clone(),
            ttl: Some(config.ttl)
                .filter(|ttl| *ttl > 0)
                .map(Duration::from_secs),
            strict_decode: config.strict_decode,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 没有保存过数据时返回空列表
    pub async fn load(&self) -> Result<NotificationList, NotificationError> {
        let stored = self.store.get(&self.key).await?;
        match stored {
            None => Ok(Vec::new()),
            Some(value) if value.is_empty() => Ok(Vec::new()),
            Some(value) => self.decode(&value),
        }
    }

    pub async fn save(&self, list: &NotificationList) -> Result<(), NotificationError> {
        let value = serde_json::to_string(list)
            .map_err(|e| NotificationError::CorruptState(e.to_string()))?;
        self.store.put(&self.key, &value, self.ttl).await?;
        tracing::debug!("已保存{}条通知到 {}", list.len(), self.key);
        Ok(())
    }

    fn decode(&self, value: &str) -> Result<NotificationList, NotificationError> {
        match serde_json::from_str::<NotificationList>(value) {
            Ok(list) => Ok(list),
            Err(e) if self.strict_decode => Err(NotificationError::CorruptState(e.to_string())),
            Err(e) => {
                tracing::error!("解析通知列表失败, 按空列表处理: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStateStore, StateStore};
    use std::sync::Arc;

    fn repository(store: Arc<MemoryStateStore>, strict_decode: bool) -> NotificationRepository {
        let config = StoreConfig {
            strict_decode,
            ..StoreConfig::default()
        };
        NotificationRepository::new(store, &config)
    }

    #[tokio::test]
    async fn missing_value_is_empty_collection() {
        let repo = repository(Arc::new(MemoryStateStore::new()), true);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_value_is_empty_unless_strict() {
        let store = Arc::new(MemoryStateStore::new());
        store.put("notifications", "not-json", None).await.unwrap();

        let lenient = repository(store.clone(), false);
        assert!(lenient.load().await.unwrap().is_empty());

        let strict = repository(store, true);
        assert!(matches!(
            strict.load().await,
            Err(NotificationError::CorruptState(_))
        ));
    }

    #[tokio::test]
    async fn save_then_load_keeps_insertion_order() {
        let store = Arc::new(MemoryStateStore::new());
        let repo = repository(store.clone(), false);
        store
            .put(
                "notifications",
                r#"[
                    {"id":"b","start":"2025-08-05T10:00:00Z","end":"2025-08-05T11:00:00Z","position":"Header","content":""},
                    {"id":"a","start":"2025-08-05T09:00:00Z","end":"2025-08-05T10:00:00Z","location":"Footer","content":""}
                ]"#,
                None,
            )
            .await
            .unwrap();

        let list = repo.load().await.unwrap();
        repo.save(&list).await.unwrap();
        let ids: Vec<String> = repo.load().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let raw = store.get("notifications").await.unwrap().unwrap();
        assert!(raw.contains(r#""position":"Footer""#));
    }
}
