//! Credential cache port
//!
//! Defines the interface for persisting credentials between runs.

use async_trait::async_trait;

use formquiz_domain::Credential;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for the cached credential.
#[async_trait]
pub trait CredentialCache: Send + Sync {
    /// Loads the cached credential.
    ///
    /// # Returns
    /// `None` if nothing has been cached yet.
    ///
    /// # Errors
    /// Returns an error if the cache exists but cannot be read or parsed.
    async fn load(&self) -> Result<Option<Credential>, CacheError>;

    /// Saves the credential, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the cache cannot be written.
    async fn save(&self, credential: &Credential) -> Result<(), CacheError>;
}
