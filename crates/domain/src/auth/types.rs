//! Authentication types for the Google `OAuth2` installed-app flow

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Google authorization endpoint.
pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

/// Default Google token endpoint.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// `OAuth2` token with metadata for expiry tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// The access token string
    pub access_token: String,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// When the token expires (if known)
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
    /// Scopes granted by this token
    #[serde(default)]
    pub scopes: Vec<String>,
    /// When this token was obtained
    pub obtained_at: DateTime<Utc>,
}

impl OAuth2Token {
    /// Create a new token obtained at `now`.
    #[must_use]
    pub fn issued_at(
        now: DateTime<Utc>,
        access_token: String,
        token_type: String,
        expires_in_secs: Option<u64>,
        refresh_token: Option<String>,
        scopes: Vec<String>,
    ) -> Self {
        // Lifetimes beyond what chrono can represent are kept without expiry.
        let expires_at = expires_in_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime));

        Self {
            access_token,
            token_type,
            expires_at,
            refresh_token,
            scopes,
            obtained_at: now,
        }
    }

    /// Create a new token with current timestamp.
    #[must_use]
    pub fn new(
        access_token: String,
        token_type: String,
        expires_in_secs: Option<u64>,
        refresh_token: Option<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self::issued_at(
            Utc::now(),
            access_token,
            token_type,
            expires_in_secs,
            refresh_token,
            scopes,
        )
    }

    /// Check if the token is expired at `now` or will expire within the buffer.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, buffer_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            TimeDelta::try_seconds(buffer_seconds)
                .and_then(|buffer| now.checked_add_signed(buffer))
                .is_none_or(|deadline| deadline >= expires_at)
        })
    }

    /// Check if the token can be refreshed.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Time until expiry in seconds, or None if no expiry.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }

    /// Returns true if every scope in `required` was granted.
    #[must_use]
    pub fn covers_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }

    /// Returns the Authorization header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// A cached credential: the token plus what is needed to refresh it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The current token.
    pub token: OAuth2Token,
    /// Client ID the token was issued to.
    pub client_id: String,
    /// Client secret used for refresh requests.
    pub client_secret: String,
    /// Token endpoint for refresh requests.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl Credential {
    /// Binds a freshly issued token to the client that obtained it.
    #[must_use]
    pub fn new(token: OAuth2Token, secrets: &ClientSecrets) -> Self {
        Self {
            token,
            client_id: secrets.client_id.clone(),
            client_secret: secrets.client_secret.clone(),
            token_uri: secrets.token_uri.clone(),
        }
    }

    /// Replaces the token after a refresh.
    ///
    /// Google omits the refresh token from refresh responses, so the
    /// previous one is carried over when the new token has none.
    #[must_use]
    pub fn refreshed(mut self, mut token: OAuth2Token) -> Self {
        if token.refresh_token.is_none() {
            token.refresh_token = self.token.refresh_token.take();
        }
        if token.scopes.is_empty() {
            token.scopes = std::mem::take(&mut self.token.scopes);
        }
        self.token = token;
        self
    }

    /// Returns the Authorization header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        self.token.authorization_header()
    }
}

/// What the credential provider should do with a cached credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialState {
    /// Usable as is.
    Valid(Credential),
    /// Expired, but carries a refresh token.
    ExpiredRefreshable(Credential),
    /// Nothing usable: missing, unreadable, expired without refresh, or
    /// granted for different scopes.
    Absent,
}

impl CredentialState {
    /// Classifies a cached credential at `now`.
    #[must_use]
    pub fn classify(
        cached: Option<Credential>,
        now: DateTime<Utc>,
        buffer_seconds: i64,
        required_scopes: &[String],
    ) -> Self {
        let Some(credential) = cached else {
            return Self::Absent;
        };

        if !credential.token.covers_scopes(required_scopes) {
            return Self::Absent;
        }

        if !credential.token.is_expired_at(now, buffer_seconds) {
            Self::Valid(credential)
        } else if credential.token.can_refresh() {
            Self::ExpiredRefreshable(credential)
        } else {
            Self::Absent
        }
    }
}

/// `OAuth2` client description from a Google client-secret file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecrets {
    /// Client ID
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Authorization endpoint URL
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    /// Token endpoint URL
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Registered redirect URIs
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    GOOGLE_AUTH_URI.to_string()
}

/// On-disk layout: the client sits under `installed` or `web`.
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Parses a client-secret JSON document.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfiguration` if the document is not
    /// valid JSON, has neither an `installed` nor a `web` section, or
    /// carries an empty client ID.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let file: ClientSecretsFile =
            serde_json::from_str(json).map_err(|e| AuthError::InvalidConfiguration {
                message: format!("malformed client secrets: {e}"),
            })?;

        let secrets = file
            .installed
            .or(file.web)
            .ok_or_else(|| AuthError::InvalidConfiguration {
                message: "client secrets contain neither an 'installed' nor a 'web' client"
                    .to_string(),
            })?;

        if secrets.client_id.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration {
                message: "client_id is empty".to_string(),
            });
        }

        Ok(secrets)
    }
}

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The client-secret file is missing.
    #[error("client secrets file not found: {path}")]
    ConfigMissing {
        /// Where the file was expected.
        path: String,
    },
    /// Invalid `OAuth2` configuration.
    #[error("invalid OAuth2 configuration: {message}")]
    InvalidConfiguration {
        /// Error description.
        message: String,
    },
    /// Token expired and no refresh token available.
    #[error("token expired and no refresh token available")]
    TokenExpiredNoRefresh,
    /// Failed to refresh token.
    #[error("failed to refresh token: {message}")]
    RefreshFailed {
        /// Error description.
        message: String,
    },
    /// `OAuth2` authorization failed.
    #[error("OAuth2 authorization failed: {message}")]
    AuthorizationFailed {
        /// Error description.
        message: String,
    },
    /// Callback server error.
    #[error("callback server error: {message}")]
    CallbackServerError {
        /// Error description.
        message: String,
    },
    /// Network error.
    #[error("network error: {message}")]
    NetworkError {
        /// Error description.
        message: String,
    },
}

impl AuthError {
    /// Returns true when the run failed for lack of client-secret configuration
    /// rather than during the flow itself.
    #[must_use]
    pub const fn is_config_missing(&self) -> bool {
        matches!(self, Self::ConfigMissing { .. })
    }
}
