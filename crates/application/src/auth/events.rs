//! Events emitted during `OAuth2` flows.

/// Progress of an authorization flow, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// The user must open this URL and approve access.
    AwaitingUser {
        /// Authorization URL.
        url: String,
    },
    /// The browser redirect reached the local listener.
    CallbackReceived,
    /// Token obtained from an authorization code.
    TokenObtained {
        /// Preview of the token (first few chars).
        token_preview: String,
        /// Seconds until expiry.
        expires_in: Option<i64>,
    },
    /// Token refreshed.
    TokenRefreshed {
        /// Preview of the new token.
        token_preview: String,
        /// Seconds until expiry.
        expires_in: Option<i64>,
    },
}

impl AuthEvent {
    /// Get a user-friendly message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AwaitingUser { url } => {
                format!("Please visit this URL to authorize this application:\n{url}")
            }
            Self::CallbackReceived => "Authorization response received".to_string(),
            Self::TokenObtained { token_preview, .. } => {
                format!("Authorization successful ({token_preview})")
            }
            Self::TokenRefreshed { token_preview, .. } => {
                format!("Credentials refreshed ({token_preview})")
            }
        }
    }
}
