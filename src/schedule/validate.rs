use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_more::Display;

// 没有时区信息的时间一律按 UTC 处理
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[display(fmt = "Invalid date format.")]
    InvalidFormat,
    #[display(fmt = "End time must be the same or after Start time.")]
    InvalidOrder,
}

impl std::error::Error for RangeError {}

/// 闭区间 `[start, end]`, 保证 `end >= start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::InvalidOrder);
        }
        Ok(Self { start, end })
    }
}

pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, RangeError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(RangeError::InvalidFormat)
}

/// 两个时间都必须能解析, 然后才比较先后
pub fn validate_range(start: &str, end: &str) -> Result<TimeRange, RangeError> {
    let start = parse_instant(start);
    let end = parse_instant(end);
    TimeRange::new(start?, end?)
}
