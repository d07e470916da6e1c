use crate::model::notification::Notification;
use crate::schedule::validate::TimeRange;

impl TimeRange {
    /// 端点相接不算重叠
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// 查找同一位置上与 `range` 时间相交的其它通知
pub fn find_overlap<'a>(
    list: &'a [Notification],
    position: &str,
    range: &TimeRange,
    exclude_id: Option<&str>,
) -> Option<&'a Notification> {
    list.iter().find(|n| {
        Some(n.id.as_str()) != exclude_id
            && n.position == position
            && range.overlaps(&TimeRange {
                start: n.start,
                end: n.end,
            })
    })
}
