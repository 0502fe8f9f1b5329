//! Application error types

use formquiz_domain::AuthError;
use thiserror::Error;

use crate::ports::FormsApiError;

/// Errors that end a run before any form is created.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The Forms API client could not be set up.
    #[error("Forms API error: {0}")]
    Api(#[from] FormsApiError),

    /// User input could not be read or parsed.
    #[error("invalid input: {0}")]
    Input(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApplicationError {
    /// Returns true if the run stopped because client secrets are missing.
    #[must_use]
    pub fn is_auth_config_missing(&self) -> bool {
        matches!(self, Self::Auth(e) if e.is_config_missing())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
