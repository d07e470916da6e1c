mod error;
pub mod notification;

pub use error::NotificationError;
pub use notification::NotificationService;
