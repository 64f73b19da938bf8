//! HTTP client for the Zoom REST API.
//!
//! Every call obtains a bearer token through [`ZoomClient::access_token`],
//! which exchanges the account credentials once and reuses the token until
//! shortly before it expires.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::config::ZoomConfig;
use crate::meetings::{CreateMeeting, Meeting, MeetingList, TokenResponse, UpdateMeeting};

/// A cached token is dropped this long before Zoom says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Errors from the Zoom API layer.
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("Zoom request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Zoom returned a non-2xx status code.
    #[error("Zoom API error ({status}): {body}")]
    Api { status: u16, body: String },
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    /// `None` when `expires_in` is too large to represent, in which case
    /// the token is used once and not cached.
    fn new(value: String, expires_in: u64) -> Option<Self> {
        let expires_at = Instant::now().checked_add(Duration::from_secs(expires_in))?;
        Some(Self { value, expires_at })
    }

    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Client for one Zoom server-to-server OAuth app.
pub struct ZoomClient {
    client: reqwest::Client,
    config: ZoomConfig,
    token: RwLock<Option<CachedToken>>,
}

impl ZoomClient {
    pub fn new(config: ZoomConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, config: ZoomConfig) -> Self {
        Self {
            client,
            config,
            token: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Return a valid access token, exchanging credentials if the cached one
    /// is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, ZoomError> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let response = self
            .client
            .post(&self.config.oauth_url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .send()
            .await?;
        let token: TokenResponse = Self::parse_response(response).await?;

        tracing::debug!(expires_in = token.expires_in, "Obtained Zoom access token");
        let value = token.access_token.clone();
        *guard = CachedToken::new(token.access_token, token.expires_in);
        if guard.is_none() {
            tracing::warn!(
                expires_in = token.expires_in,
                "Zoom token lifetime out of range, not caching"
            );
        }
        Ok(value)
    }

    /// Forget the cached token so the next call re-authenticates.
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// Schedule a meeting owned by the app's account user.
    pub async fn create_meeting(&self, meeting: &CreateMeeting) -> Result<Meeting, ZoomError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(self.url("/users/me/meetings"))
            .bearer_auth(token)
            .json(meeting)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn get_meeting(&self, meeting_id: i64) -> Result<Meeting, ZoomError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.url(&format!("/meetings/{meeting_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Apply a partial update. Zoom answers `204 No Content`.
    pub async fn update_meeting(
        &self,
        meeting_id: i64,
        changes: &UpdateMeeting,
    ) -> Result<(), ZoomError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .patch(self.url(&format!("/meetings/{meeting_id}")))
            .bearer_auth(token)
            .json(changes)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub async fn delete_meeting(&self, meeting_id: i64) -> Result<(), ZoomError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .delete(self.url(&format!("/meetings/{meeting_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// List upcoming meetings, one page at a time.
    pub async fn list_meetings(
        &self,
        page_size: u32,
        next_page_token: Option<&str>,
    ) -> Result<MeetingList, ZoomError> {
        let token = self.access_token().await?;
        let mut request = self
            .client
            .get(self.url("/users/me/meetings"))
            .bearer_auth(token)
            .query(&[("type", "upcoming")])
            .query(&[("page_size", page_size.clamp(1, 300))]);
        if let Some(page_token) = next_page_token {
            request = request.query(&[("next_page_token", page_token)]);
        }
        Self::parse_response(request.send().await?).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ZoomError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ZoomError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ZoomError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ZoomError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_stale_inside_margin() {
        let near = CachedToken {
            value: "t".into(),
            expires_at: Instant::now() + Duration::from_secs(30),
        };
        assert!(!near.is_fresh());

        let later = CachedToken {
            value: "t".into(),
            expires_at: Instant::now() + Duration::from_secs(3600),
        };
        assert!(later.is_fresh());
    }

    #[test]
    fn absurd_lifetime_is_not_cached() {
        assert!(CachedToken::new("t".into(), u64::MAX).is_none());
        assert!(CachedToken::new("t".into(), 3600).unwrap().is_fresh());
    }
}
