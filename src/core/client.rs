use crate::domain::model::{PopupNotifications, Session, SiteInfo, TokenGrant};
use crate::domain::ports::{ConfigProvider, NotificationSource};
use crate::utils::error::{MoodleError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// User-Agent presented by the Moodle mobile app; some sites gate the mobile
/// web-service endpoints on it.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 7.1.1; Moto G Play Build/NPIS26.48-43-2; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/71.0.3578.99 Mobile Safari/537.36 MoodleMobile";

/// Service identifier sent with every token request.
const MOBILE_SERVICE: &str = "moodle_mobile_app";

const TOKEN_ENDPOINT: &str = "login/token.php";
const REST_ENDPOINT: &str = "webservice/rest/server.php";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one Moodle instance.
///
/// All calls are blocking from the caller's point of view and issued one at a
/// time; session state mutates in place, so the client is not meant to be
/// shared across concurrent callers without external synchronization.
pub struct MoodleClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl MoodleClient {
    /// Builds a client for the instance at `base_url`.
    ///
    /// The URL is normalized to end in `/` so endpoint paths append cleanly.
    /// Every request carries the mobile User-Agent and is bounded by
    /// `timeout` rather than hanging indefinitely.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let http = Client::builder()
            .user_agent(MOBILE_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            http,
            session: Session::default(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    /// Current authentication state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exchanges credentials for a web-service token.
    ///
    /// `Ok(false)` means the endpoint answered but did not issue a full grant:
    /// the raw body must contain both the `token` and `privatetoken` markers
    /// before it is decoded at all. No structured error detail is guaranteed
    /// in that case. Transport and decode failures are errors, and a token
    /// from an earlier login is left in place on every failure path.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        let form = [
            ("username", username),
            ("password", password),
            ("service", MOBILE_SERVICE),
        ];

        let response = self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_ENDPOINT))
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        if !(body.contains("token") && body.contains("privatetoken")) {
            tracing::warn!("login rejected by token endpoint");
            return Ok(false);
        }

        let grant: TokenGrant = serde_json::from_str(&body)?;
        self.session.set_token(grant.token);
        tracing::info!("login successful");
        Ok(true)
    }

    /// Fetches site metadata for the logged-in user and remembers the user id
    /// from the response for later notification calls.
    pub async fn get_site_info(&mut self) -> Result<SiteInfo> {
        let body = self
            .call_function("core_webservice_get_site_info", None)
            .await?;
        let info: SiteInfo = serde_json::from_value(body)?;

        let user_id = info
            .userid
            .ok_or(MoodleError::MissingField { field: "userid" })?;
        self.session.set_user_id(user_id);

        Ok(info)
    }

    /// Popup notifications addressed to `user_id`, in the order the service
    /// delivers them.
    pub async fn get_popup_notifications(&self, user_id: u64) -> Result<PopupNotifications> {
        let body = self
            .call_function("message_popup_get_popup_notifications", Some(user_id))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Number of unread popup notifications for `user_id`. The service
    /// answers this function with a bare integer body.
    pub async fn get_unread_count(&self, user_id: u64) -> Result<i64> {
        let body = self
            .call_function(
                "message_popup_get_unread_popup_notification_count",
                Some(user_id),
            )
            .await?;
        body.as_i64().ok_or(MoodleError::MissingField {
            field: "unread notification count",
        })
    }

    /// Shared primitive behind every authenticated operation: POST to the
    /// REST endpoint with `wstoken`, `wsfunction`, the JSON response format,
    /// and `useridto` when the function targets a user. Returns the decoded
    /// body verbatim.
    ///
    /// Refuses without issuing any request when no token is held.
    pub async fn call_function(&self, wsfunction: &str, user_id: Option<u64>) -> Result<Value> {
        let token = self.session.token().ok_or_else(|| {
            tracing::error!("token not set, login first");
            MoodleError::Unauthenticated
        })?;

        let mut params = vec![
            ("wstoken", token.to_string()),
            ("wsfunction", wsfunction.to_string()),
            ("moodlewsrestformat", "json".to_string()),
        ];
        if let Some(id) = user_id {
            params.push(("useridto", id.to_string()));
        }

        tracing::debug!(wsfunction, "calling web-service function");
        let response = self
            .http
            .post(format!("{}{}", self.base_url, REST_ENDPOINT))
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!(status = %response.status(), "web-service response");

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NotificationSource for MoodleClient {
    async fn popup_notifications(&self, user_id: u64) -> Result<PopupNotifications> {
        self.get_popup_notifications(user_id).await
    }

    async fn unread_count(&self, user_id: u64) -> Result<i64> {
        self.get_unread_count(user_id).await
    }
}
