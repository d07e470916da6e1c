//! 通知排期的核心规则: 时间校验, 同位置重叠检测, 时间窗口判断
pub mod overlap;
pub mod validate;
pub mod window;

pub use overlap::find_overlap;
pub use validate::{parse_instant, validate_range, RangeError, TimeRange};
pub use window::{resolve_zone, InvalidTimezone, WindowMode, WindowQuery};
