pub mod client;
pub mod digest;

pub use crate::domain::model::{Notification, PopupNotifications, Session, SiteInfo};
pub use crate::domain::ports::{ConfigProvider, NotificationSource};
pub use crate::utils::error::Result;
