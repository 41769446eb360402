use crate::domain::model::PopupNotifications;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn popup_notifications(&self, user_id: u64) -> Result<PopupNotifications>;
    async fn unread_count(&self, user_id: u64) -> Result<i64>;
}
