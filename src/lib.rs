pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::Cli;
pub use crate::config::{MoodleConfig, MoodleSection};

pub use crate::core::client::{MoodleClient, DEFAULT_TIMEOUT};
pub use crate::core::digest::{DigestEngine, NotificationDigest, RenderedNotification};
pub use crate::domain::model::{Notification, PopupNotifications, Session, SiteInfo};
pub use crate::domain::ports::{ConfigProvider, NotificationSource};
pub use crate::utils::error::{MoodleError, Result};
pub use crate::utils::text::extract_text;
