use crate::domain::model::Notification;
use crate::domain::ports::NotificationSource;
use crate::utils::error::Result;
use crate::utils::text::extract_text;
use chrono::{DateTime, Utc};

/// Summary of a user's popup inbox: the unread total plus the newest message
/// rendered for display.
#[derive(Debug, Clone)]
pub struct NotificationDigest {
    pub unread: i64,
    pub newest: Option<RenderedNotification>,
}

#[derive(Debug, Clone)]
pub struct RenderedNotification {
    pub id: i64,
    pub subject: Option<String>,
    pub time_created: Option<DateTime<Utc>>,
    pub body: String,
}

pub struct DigestEngine<S: NotificationSource> {
    source: S,
}

impl<S: NotificationSource> DigestEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches the notification list and the unread count, one call after the
    /// other, and renders the first-delivered notification as plain text.
    pub async fn run(&self, user_id: u64) -> Result<NotificationDigest> {
        tracing::debug!(user_id, "building notification digest");

        let inbox = self.source.popup_notifications(user_id).await?;
        tracing::debug!("received {} notifications", inbox.notifications.len());

        let unread = self.source.unread_count(user_id).await?;

        let newest = inbox.newest().map(render);
        Ok(NotificationDigest { unread, newest })
    }
}

fn render(notification: &Notification) -> RenderedNotification {
    let body = notification
        .fullmessagehtml
        .as_deref()
        .map(extract_text)
        .unwrap_or_default();

    RenderedNotification {
        id: notification.id,
        subject: notification.subject.clone(),
        time_created: notification.time_created(),
        body,
    }
}
