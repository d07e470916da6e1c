use derive_more::Display;

use crate::schedule::{InvalidTimezone, RangeError};
use crate::store::StoreError;

#[derive(Debug, Display)]
pub enum NotificationError {
    #[display(fmt = "missing parameter(s) '{}'", _0)]
    MissingInputs(String),
    #[display(fmt = "Invalid \"id\" or \"updates\" payload.")]
    InvalidUpdatePayload,
    #[display(fmt = "{}", _0)]
    InvalidRange(RangeError),
    #[display(fmt = "Notification with id '{}' already exists.", _0)]
    DuplicateId(String),
    #[display(fmt = "Notification with id '{}' not found.", _0)]
    NotFound(String),
    #[display(fmt = "No notifications found.")]
    EmptyCollection,
    #[display(fmt = "Time window overlaps an existing notification.")]
    Overlap { position: String, conflicting_id: String },
    #[display(fmt = "Invalid timezone format")]
    InvalidTimezone(String),
    #[display(fmt = "stored notifications are corrupt: {}", _0)]
    CorruptState(String),
    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

impl std::error::Error for NotificationError {}

impl From<RangeError> for NotificationError {
    fn from(error: RangeError) -> Self {
        Self::InvalidRange(error)
    }
}

impl From<InvalidTimezone> for NotificationError {
    fn from(error: InvalidTimezone) -> Self {
        Self::InvalidTimezone(error.0)
    }
}

impl From<StoreError> for NotificationError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
