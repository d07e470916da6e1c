use chrono::{DateTime, Utc};

use super::NotificationError;
use crate::model::notification::{
    Notification, NotificationDraft, NotificationList, NotificationPatch, PublicNotification,
    WindowedNotification,
};
use crate::repository::NotificationRepository;
use crate::schedule::{
    find_overlap, parse_instant, resolve_zone, validate_range, TimeRange, WindowMode, WindowQuery,
};

/// 通知的增删改查. 每个写操作都是一次完整的读取-修改-写回,
/// 并发写入时后写者覆盖先写者
pub struct NotificationService {
    repository: NotificationRepository,
}

/// 时间窗口查询的参数
#[derive(Debug, Default, Clone)]
pub struct WindowFilter {
    pub position: Option<String>,
    pub tz: Option<String>,
    pub tzaware: bool,
}

impl NotificationService {
    pub fn new(repository: NotificationRepository) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, NotificationError> {
        let missing = draft.missing_fields();
        let NotificationDraft {
            id,
            start,
            end,
            position,
            content,
        } = draft;
        let (id, start, end, position) = match (id, start, end, position) {
            (Some(id), Some(start), Some(end), Some(position)) if missing.is_empty() => {
                (id, start, end, position)
            }
            _ => return Err(NotificationError::MissingInputs(missing.join(","))),
        };
        let range = validate_range(&start, &end)?;

        let mut list = self.repository.load().await?;
        if list.iter().any(|n| n.id == id) {
            return Err(NotificationError::DuplicateId(id));
        }
        ensure_free(&list, &position, &range, None)?;

        let notification = Notification {
            id,
            start: range.start,
            end: range.end,
            position,
            content: content.unwrap_or_default(),
        };
        list.push(notification.clone());
        self.repository.save(&list).await?;
        tracing::info!(
            "创建通知成功, id: {}, 位置: {}",
            notification.id,
            notification.position
        );
        Ok(notification)
    }

    pub async fn update(
        &self,
        id: Option<String>,
        patch: Option<NotificationPatch>,
    ) -> Result<Notification, NotificationError> {
        let (id, patch) = match (id.filter(|id| !id.is_empty()), patch) {
            (Some(id), Some(patch)) => (id, patch),
            _ => return Err(NotificationError::InvalidUpdatePayload),
        };
        let patched_start = patch.start.as_deref().map(parse_instant).transpose()?;
        let patched_end = patch.end.as_deref().map(parse_instant).transpose()?;
        if let (Some(start), Some(end)) = (patched_start, patched_end) {
            TimeRange::new(start, end)?;
        }

        let mut list = self.repository.load().await?;
        if list.is_empty() {
            return Err(NotificationError::EmptyCollection);
        }
        let index = list.iter().position(|n| n.id == id);
        let existing = index.map(|i| &list[i]);

        // 只改内容时跳过时间校验和重叠检测
        if patch.touches_schedule() {
            let start = patched_start.or(existing.map(|n| n.start));
            let end = patched_end.or(existing.map(|n| n.end));
            let position = patch
                .position
                .clone()
                .or_else(|| existing.map(|n| n.position.clone()));
            if let (Some(start), Some(end), Some(position)) = (start, end, position) {
                let range = TimeRange::new(start, end)?;
                ensure_free(&list, &position, &range, Some(&id))?;
            }
        }

        let index = index.ok_or_else(|| NotificationError::NotFound(id.clone()))?;
        let updated = apply_patch(&mut list[index], patch, patched_start, patched_end);
        self.repository.save(&list).await?;
        tracing::info!("更新通知成功, id: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), NotificationError> {
        let mut list = self.repository.load().await?;
        let before = list.len();
        list.retain(|n| n.id != id);
        if list.len() == before {
            return Err(NotificationError::NotFound(id.to_string()));
        }
        self.repository.save(&list).await?;
        tracing::info!("删除通知成功, id: {}", id);
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), NotificationError> {
        self.repository.save(&Vec::new()).await?;
        tracing::info!("已清空全部通知");
        Ok(())
    }

    /// 管理后台使用, 包含 id
    pub async fn list(&self) -> Result<NotificationList, NotificationError> {
        self.repository.load().await
    }

    pub async fn list_all(
        &self,
        position: Option<&str>,
    ) -> Result<Vec<PublicNotification>, NotificationError> {
        let list = self.repository.load().await?;
        Ok(list
            .iter()
            .filter(|n| position.map_or(true, |p| n.position == p))
            .map(PublicNotification::from)
            .collect())
    }

    pub async fn list_active(
        &self,
        filter: &WindowFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<WindowedNotification>, NotificationError> {
        self.list_window(filter, now, WindowMode::Active).await
    }

    pub async fn list_live(
        &self,
        filter: &WindowFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<WindowedNotification>, NotificationError> {
        self.list_window(filter, now, WindowMode::Live).await
    }

    async fn list_window(
        &self,
        filter: &WindowFilter,
        now: DateTime<Utc>,
        mode: WindowMode,
    ) -> Result<Vec<WindowedNotification>, NotificationError> {
        let zone = resolve_zone(filter.tz.as_deref(), filter.tzaware)?;
        let list = self.repository.load().await?;
        let query = WindowQuery {
            now,
            zone,
            position: filter.position.as_deref().filter(|p| !p.is_empty()),
            mode,
        };
        Ok(list.iter().filter_map(|n| query.evaluate(n)).collect())
    }
}

fn ensure_free(
    list: &[Notification],
    position: &str,
    range: &TimeRange,
    exclude_id: Option<&str>,
) -> Result<(), NotificationError> {
    match find_overlap(list, position, range, exclude_id) {
        Some(conflict) => Err(NotificationError::Overlap {
            position: position.to_string(),
            conflicting_id: conflict.id.clone(),
        }),
        None => Ok(()),
    }
}

fn apply_patch(
    n: &mut Notification,
    patch: NotificationPatch,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Notification {
    if let Some(start) = start {
        n.start = start;
    }
    if let Some(end) = end {
        n.end = end;
    }
    if let Some(position) = patch.position {
        n.position = position;
    }
    if let Some(content) = patch.content {
        n.content = content;
    }
    n.clone()
}
