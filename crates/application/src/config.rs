//! Process-wide configuration.

use std::path::PathBuf;

/// Scope needed to create and edit forms.
pub const FORMS_BODY_SCOPE: &str = "https://www.googleapis.com/auth/forms.body";

/// Default credential cache file.
pub const DEFAULT_TOKEN_CACHE: &str = "token.json";

/// Default client-secret file.
pub const DEFAULT_CLIENT_SECRETS: &str = "Web.Credentials.json";

/// Default port of the local `OAuth2` callback listener.
pub const DEFAULT_CALLBACK_PORT: u16 = 8080;

/// Default Forms API endpoint.
pub const DEFAULT_API_BASE: &str = "https://forms.googleapis.com";

/// Seconds before expiry at which a cached token is treated as expired.
pub const DEFAULT_REFRESH_BUFFER_SECONDS: i64 = 60;

/// Immutable configuration built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `OAuth2` scopes requested.
    pub scopes: Vec<String>,
    /// Where the credential is cached between runs.
    pub token_cache_path: PathBuf,
    /// Where the `OAuth2` client secrets are read from.
    pub client_secrets_path: PathBuf,
    /// Port of the local callback listener.
    pub callback_port: u16,
    /// Forms API base URL.
    pub api_base_url: String,
    /// Expiry buffer for cached tokens.
    pub refresh_buffer_seconds: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scopes: vec![FORMS_BODY_SCOPE.to_string()],
            token_cache_path: PathBuf::from(DEFAULT_TOKEN_CACHE),
            client_secrets_path: PathBuf::from(DEFAULT_CLIENT_SECRETS),
            callback_port: DEFAULT_CALLBACK_PORT,
            api_base_url: DEFAULT_API_BASE.to_string(),
            refresh_buffer_seconds: DEFAULT_REFRESH_BUFFER_SECONDS,
        }
    }
}

impl AppConfig {
    /// Set the credential cache path.
    #[must_use]
    pub fn with_token_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_cache_path = path.into();
        self
    }

    /// Set the client-secret path.
    #[must_use]
    pub fn with_client_secrets(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_secrets_path = path.into();
        self
    }

    /// Set the callback port for the authorization code flow.
    #[must_use]
    pub const fn with_callback_port(mut self, port: u16) -> Self {
        self.callback_port = port;
        self
    }

    /// Set the Forms API base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }
}
