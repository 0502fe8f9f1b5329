//! Obtains a usable credential for the Forms API.

use std::sync::Arc;

use formquiz_domain::{AuthError, Credential, CredentialState};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::ports::{AuthorizationServer, ClientSecretsSource, Clock, CredentialCache};

/// Get a preview of an access token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    match token.get(..8) {
        Some(head) if token.len() > 12 => format!("{head}..."),
        _ => token.to_string(),
    }
}

/// Resolves a credential from the cache, a refresh, or the interactive flow.
pub struct CredentialProvider {
    cache: Arc<dyn CredentialCache>,
    secrets: Arc<dyn ClientSecretsSource>,
    server: Arc<dyn AuthorizationServer>,
    clock: Arc<dyn Clock>,
    scopes: Vec<String>,
    refresh_buffer_seconds: i64,
}

impl CredentialProvider {
    /// Create a provider over the given adapters.
    #[must_use]
    pub fn new(
        cache: Arc<dyn CredentialCache>,
        secrets: Arc<dyn ClientSecretsSource>,
        server: Arc<dyn AuthorizationServer>,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
    ) -> Self {
        Self {
            cache,
            secrets,
            server,
            clock,
            scopes: config.scopes.clone(),
            refresh_buffer_seconds: config.refresh_buffer_seconds,
        }
    }

    /// Returns a credential that is valid now.
    ///
    /// A cached credential is used as is when still valid. An expired one
    /// is refreshed when it carries a refresh token; if that fails, or
    /// there is nothing usable in the cache, the interactive flow runs.
    /// New credentials are written back to the cache; a failed write is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// `AuthError::ConfigMissing` when the interactive flow is needed but
    /// no client secrets exist; any error of the interactive flow itself.
    pub async fn obtain(&self) -> Result<Credential, AuthError> {
        let cached = self.load_cached().await;
        let state = CredentialState::classify(
            cached,
            self.clock.now(),
            self.refresh_buffer_seconds,
            &self.scopes,
        );

        let credential = match state {
            CredentialState::Valid(credential) => {
                info!(
                    token = %token_preview(&credential.token.access_token),
                    "Using valid cached credentials"
                );
                return Ok(credential);
            }
            CredentialState::ExpiredRefreshable(credential) => {
                info!("Refreshing expired credentials");
                match self.server.refresh(&credential).await {
                    Ok(refreshed) => refreshed,
                    Err(e) => {
                        warn!(error = %e, "Refresh failed, falling back to interactive authorization");
                        self.authorize().await?
                    }
                }
            }
            CredentialState::Absent => self.authorize().await?,
        };

        self.persist(&credential).await;
        Ok(credential)
    }

    async fn load_cached(&self) -> Option<Credential> {
        match self.cache.load().await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable credential cache");
                None
            }
        }
    }

    async fn authorize(&self) -> Result<Credential, AuthError> {
        let secrets = self.secrets.load().await?;
        info!("No valid credentials, starting interactive authorization");
        self.server.authorize(&secrets, &self.scopes).await
    }

    async fn persist(&self, credential: &Credential) {
        match self.cache.save(credential).await {
            Ok(()) => info!("Authentication successful, credentials saved"),
            Err(e) => warn!(error = %e, "Could not save credentials; continuing with them for this run"),
        }
    }
}
