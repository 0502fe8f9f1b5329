//! Client-secret file loader.

use std::path::PathBuf;

use async_trait::async_trait;
use formquiz_application::ports::{ClientSecretsSource, FileSystem, FileSystemError};
use formquiz_domain::{AuthError, ClientSecrets};
use tracing::debug;

/// Reads the `OAuth2` client downloaded from the Google Cloud Console.
#[derive(Debug, Clone)]
pub struct FileClientSecrets<F> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> FileClientSecrets<F> {
    /// Creates a loader for the file at `path`.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<F: FileSystem + Sync> ClientSecretsSource for FileClientSecrets<F> {
    async fn load(&self) -> Result<ClientSecrets, AuthError> {
        let bytes = self.fs.read_file(&self.path).await.map_err(|e| match e {
            FileSystemError::NotFound(_) => AuthError::ConfigMissing {
                path: self.path.display().to_string(),
            },
            other => AuthError::InvalidConfiguration {
                message: format!("cannot read {}: {other}", self.path.display()),
            },
        })?;

        let json = String::from_utf8(bytes).map_err(|e| AuthError::InvalidConfiguration {
            message: format!("{} is not UTF-8: {e}", self.path.display()),
        })?;

        let secrets = ClientSecrets::from_json(&json)?;
        debug!(path = %self.path.display(), "Loaded client secrets");
        Ok(secrets)
    }
}
