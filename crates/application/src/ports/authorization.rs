//! Authorization ports: client-secret source and the `OAuth2` server.

use async_trait::async_trait;

use formquiz_domain::{AuthError, ClientSecrets, Credential};

/// Source of the `OAuth2` client configuration.
#[async_trait]
pub trait ClientSecretsSource: Send + Sync {
    /// Loads the client secrets.
    ///
    /// # Errors
    /// `AuthError::ConfigMissing` if no configuration exists,
    /// `AuthError::InvalidConfiguration` if it cannot be parsed.
    async fn load(&self) -> Result<ClientSecrets, AuthError>;
}

/// The `OAuth2` authorization server, including the user-facing part of
/// the authorization code flow.
#[async_trait]
pub trait AuthorizationServer: Send + Sync {
    /// Exchanges the credential's refresh token for a new access token.
    ///
    /// # Errors
    /// Returns `AuthError::RefreshFailed` or `AuthError::NetworkError`.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError>;

    /// Runs the interactive authorization code flow.
    ///
    /// Requires the user to approve access in a browser; the redirect is
    /// received by a local callback listener.
    ///
    /// # Errors
    /// Returns an error if the listener cannot start, the user denies
    /// access, or the code exchange fails.
    async fn authorize(
        &self,
        secrets: &ClientSecrets,
        scopes: &[String],
    ) -> Result<Credential, AuthError>;
}
