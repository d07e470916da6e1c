use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::serde_fn::bool_like;

/// 存储中的一条通知记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(alias = "location")]
    pub position: String,
    #[serde(default)]
    pub content: String,
}

pub type NotificationList = Vec<Notification>;

/// 创建通知时客户端提交的字段, 全部可缺省以便报告缺少的参数
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(alias = "location")]
    pub position: Option<String>,
    pub content: Option<String>,
}

impl NotificationDraft {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.id) {
            missing.push("data.id");
        }
        if is_blank(&self.start) {
            missing.push("data.start");
        }
        if is_blank(&self.end) {
            missing.push("data.end");
        }
        if is_blank(&self.position) {
            missing.push("data.position");
        }
        missing
    }
}

/// 更新通知时的部分字段, 未给出的字段保持原值
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotificationPatch {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(alias = "location")]
    pub position: Option<String>,
    pub content: Option<String>,
}

impl NotificationPatch {
    pub fn touches_schedule(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.position.is_some()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateNotificationInput {
    pub data: Option<NotificationDraft>,
}

impl CreateNotificationInput {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match &self.data {
            Some(draft) => draft.missing_fields(),
            None => NotificationDraft::default().missing_fields(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNotificationData {
    pub id: Option<String>,
    pub updates: Option<serde_json::Value>,
}

impl UpdateNotificationData {
    /// `updates` 不是合法的对象时返回 `None`
    pub fn patch(&self) -> Option<NotificationPatch> {
        self.updates
            .as_ref()
            .filter(|v| v.is_object())
            .and_then(|v| NotificationPatch::deserialize(v).ok())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNotificationInput {
    pub data: Option<UpdateNotificationData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteNotificationData {
    pub id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteNotificationInput {
    pub data: Option<DeleteNotificationData>,
}

impl DeleteNotificationInput {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self.data.as_ref().map(|d| &d.id) {
            Some(id) if !is_blank(id) => Vec::new(),
            _ => vec!["data.id"],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetAllNotificationsQuery {
    #[serde(alias = "location")]
    pub position: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetWindowNotificationsQuery {
    #[serde(alias = "location")]
    pub position: Option<String>,
    pub tz: Option<String>,
    #[serde(default, deserialize_with = "bool_like")]
    pub tzaware: bool,
}

/// 公开接口返回的通知, 不包含 id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicNotification {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub position: String,
    pub content: String,
}

impl From<&Notification> for PublicNotification {
    fn from(n: &Notification) -> Self {
        Self {
            start: n.start,
            end: n.end,
            position: n.position.clone(),
            content: n.content.clone(),
        }
    }
}

/// 时间窗口查询的结果, 附带按时区换算后的起止时间
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowedNotification {
    #[serde(flatten)]
    pub notification: PublicNotification,
    #[serde(rename = "adjustedStart")]
    pub adjusted_start: String,
    #[serde(rename = "adjustedEnd")]
    pub adjusted_end: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_is_accepted_as_position() {
        let n: Notification = serde_json::from_value(json!({
            "id": "n1",
            "start": "2025-08-05T10:00:00Z",
            "end": "2025-08-05T12:00:00+02:00",
            "location": "Header"
        }))
        .unwrap();
        assert_eq!(n.position, "Header");
        assert_eq!(n.content, "");
        assert_eq!(n.end.to_rfc3339(), "2025-08-05T10:00:00+00:00");

        let stored = serde_json::to_value(&n).unwrap();
        assert_eq!(stored["position"], "Header");
        assert_eq!(stored["start"], "2025-08-05T10:00:00Z");
    }

    #[test]
    fn draft_reports_missing_and_empty_fields() {
        let draft = NotificationDraft {
            id: Some("n1".to_string()),
            start: Some(String::new()),
            ..NotificationDraft::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec!["data.start", "data.end", "data.position"]
        );
        assert_eq!(
            CreateNotificationInput::default().missing_fields(),
            vec!["data.id", "data.start", "data.end", "data.position"]
        );
    }

    #[test]
    fn update_payload_requires_object_updates() {
        let data: UpdateNotificationData =
            serde_json::from_value(json!({"id": "n1", "updates": "x"})).unwrap();
        assert!(data.patch().is_none());
        let data: UpdateNotificationData =
            serde_json::from_value(json!({"id": "n1", "updates": {"location": "Footer"}})).unwrap();
        assert_eq!(data.patch().unwrap().position.as_deref(), Some("Footer"));
    }

    #[test]
    fn content_only_patch_does_not_touch_schedule() {
        let patch: NotificationPatch =
            serde_json::from_value(json!({"content": "new", "title": "ignored"})).unwrap();
        assert!(!patch.touches_schedule());
        let patch: NotificationPatch =
            serde_json::from_value(json!({"location": "Footer"})).unwrap();
        assert!(patch.touches_schedule());
    }

    #[test]
    fn windowed_notification_flattens_and_hides_id() {
        let n = Notification {
            id: "secret".to_string(),
            start: "2025-08-05T10:00:00Z".parse().unwrap(),
            end: "2025-08-05T12:00:00Z".parse().unwrap(),
            position: "Header".to_string(),
            content: "x".to_string(),
        };
        let out = serde_json::to_value(WindowedNotification {
            notification: PublicNotification::from(&n),
            adjusted_start: "a".to_string(),
            adjusted_end: "b".to_string(),
        })
        .unwrap();
        assert!(out.get("id").is_none());
        assert_eq!(out["position"], "Header");
        assert_eq!(out["adjustedStart"], "a");
        assert_eq!(out["adjustedEnd"], "b");
    }
}
