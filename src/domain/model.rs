use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authentication state for one web-service session.
///
/// Starts empty; the token is set by a successful login and the user id by a
/// successful site-info call. Lives only as long as the client that owns it.
#[derive(Debug, Default, Clone)]
pub struct Session {
    token: Option<String>,
    user_id: Option<u64>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn set_user_id(&mut self, user_id: u64) {
        self.user_id = Some(user_id);
    }
}

/// Decoded body of a successful token-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    pub privatetoken: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub sitename: Option<String>,
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub fullname: Option<String>,
    pub lang: Option<String>,
    pub userid: Option<u64>,
    pub siteurl: Option<String>,
    pub release: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One popup notification as delivered by the service. Read-only on this side;
/// attributes the client does not model land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub useridfrom: Option<i64>,
    pub useridto: Option<i64>,
    pub subject: Option<String>,
    pub smallmessage: Option<String>,
    pub fullmessage: Option<String>,
    pub fullmessagehtml: Option<String>,
    pub fullmessageformat: Option<i64>,
    pub timecreated: Option<i64>,
    pub timeread: Option<i64>,
    pub read: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Notification {
    /// Creation time as UTC, when the service supplied an epoch stamp.
    pub fn time_created(&self) -> Option<DateTime<Utc>> {
        self.timecreated
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupNotifications {
    pub notifications: Vec<Notification>,
    pub unreadcount: Option<i64>,
}

impl PopupNotifications {
    /// First notification in service order. The service delivers newest-first;
    /// this client does not re-sort or verify that.
    pub fn newest(&self) -> Option<&Notification> {
        self.notifications.first()
    }
}
