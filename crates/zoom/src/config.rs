/// Default REST base for the Zoom v2 API.
pub const DEFAULT_API_BASE: &str = "https://api.zoom.us/v2";

/// Default server-to-server OAuth token endpoint.
pub const DEFAULT_OAUTH_URL: &str = "https://zoom.us/oauth/token";

/// Credentials and endpoints for a Zoom server-to-server OAuth app.
#[derive(Debug, Clone)]
pub struct ZoomConfig {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_base: String,
    pub oauth_url: String,
}

impl ZoomConfig {
    pub fn new(account_id: String, client_id: String, client_secret: String) -> Self {
        Self {
            account_id,
            client_id,
            client_secret,
            api_base: DEFAULT_API_BASE.to_string(),
            oauth_url: DEFAULT_OAUTH_URL.to_string(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// | Env var              | Default                       |
    /// |----------------------|-------------------------------|
    /// | `ZOOM_ACCOUNT_ID`    | required                      |
    /// | `ZOOM_CLIENT_ID`     | required                      |
    /// | `ZOOM_CLIENT_SECRET` | required                      |
    /// | `ZOOM_API_BASE`      | `https://api.zoom.us/v2`      |
    /// | `ZOOM_OAUTH_URL`     | `https://zoom.us/oauth/token` |
    ///
    /// Returns `None` when any credential is missing or blank, which leaves
    /// the integration disabled.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::new(
            var("ZOOM_ACCOUNT_ID")?,
            var("ZOOM_CLIENT_ID")?,
            var("ZOOM_CLIENT_SECRET")?,
        );
        if let Some(api_base) = var("ZOOM_API_BASE") {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(oauth_url) = var("ZOOM_OAUTH_URL") {
            config.oauth_url = oauth_url;
        }
        Some(config)
    }
}
