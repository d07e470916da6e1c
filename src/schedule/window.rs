use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use derive_more::Display;

use crate::model::notification::{Notification, PublicNotification, WindowedNotification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// `start <= now <= end`
    Active,
    /// `now <= end`, 包括尚未开始的通知
    Live,
}

#[derive(Debug, Clone, Copy)]
pub struct WindowQuery<'a> {
    pub now: DateTime<Utc>,
    pub zone: Option<Tz>,
    pub position: Option<&'a str>,
    pub mode: WindowMode,
}

impl<'a> WindowQuery<'a> {
    pub fn includes(&self, n: &Notification) -> bool {
        let in_window = match self.mode {
            WindowMode::Active => n.start <= self.now && self.now <= n.end,
            WindowMode::Live => self.now <= n.end,
        };
        in_window && self.position.map_or(true, |p| n.position == p)
    }

    /// 比较始终在 UTC 上进行, 时区只影响返回的起止时间的表示
    pub fn evaluate(&self, n: &Notification) -> Option<WindowedNotification> {
        if !self.includes(n) {
            return None;
        }
        Some(WindowedNotification {
            notification: PublicNotification::from(n),
            adjusted_start: self.render(n.start),
            adjusted_end: self.render(n.end),
        })
    }

    fn render(&self, instant: DateTime<Utc>) -> String {
        match self.zone {
            Some(zone) => instant
                .with_timezone(&zone)
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            None => instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(fmt = "Invalid timezone format")]
pub struct InvalidTimezone(pub String);

impl std::error::Error for InvalidTimezone {}

/// 只有在 `tzaware` 打开时才解析时区名
pub fn resolve_zone(tz: Option<&str>, tzaware: bool) -> Result<Option<Tz>, InvalidTimezone> {
    match tz.filter(|t| !t.is_empty()) {
        Some(name) if tzaware => name
            .parse::<Tz>()
            .map(Some)
            .map_err(|_| InvalidTimezone(name.to_string())),
        _ => Ok(None),
    }
}
