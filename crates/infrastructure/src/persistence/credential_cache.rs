//! File-based credential cache.
//!
//! The credential is stored as JSON next to the program by default
//! (`token.json`). It holds a refresh token and the client secret, so it
//! should not be committed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formquiz_application::ports::{CacheError, CredentialCache, FileSystem, FileSystemError};
use formquiz_domain::Credential;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// JSON file credential cache.
///
/// ```json
/// {
///   "token": {
///     "access_token": "ya29...",
///     "token_type": "Bearer",
///     "expires_at": "2026-01-01T13:00:00Z",
///     "refresh_token": "1//0g...",
///     "scopes": ["https://www.googleapis.com/auth/forms.body"],
///     "obtained_at": "2026-01-01T12:00:00Z"
///   },
///   "client_id": "...apps.googleusercontent.com",
///   "client_secret": "...",
///   "token_uri": "https://oauth2.googleapis.com/token"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialCache<F> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> FileCredentialCache<F> {
    /// Creates a cache backed by the file at `path`.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// The cache file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<F: FileSystem + Sync> CredentialCache for FileCredentialCache<F> {
    async fn load(&self) -> Result<Option<Credential>, CacheError> {
        let content = match self.fs.read_file(&self.path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(CacheError::Io(e.to_string())),
        };

        from_json_bytes(&content)
            .map(Some)
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CacheError> {
        let content = to_json_stable_bytes(credential)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokioFileSystem;
    use formquiz_domain::{ClientSecrets, OAuth2Token};
    use pretty_assertions::assert_eq;

    fn credential() -> Credential {
        let token = OAuth2Token::new(
            "access".to_string(),
            "Bearer".to_string(),
            Some(3600),
            Some("refresh".to_string()),
            vec!["https://www.googleapis.com/auth/forms.body".to_string()],
        );
        let secrets = ClientSecrets {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uris: vec![],
        };
        Credential::new(token, &secrets)
    }

    #[tokio::test]
    async fn test_missing_cache_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = FileCredentialCache::new(TokioFileSystem::new(), dir.path().join("token.json"));

        assert_eq!(cache.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = FileCredentialCache::new(TokioFileSystem::new(), dir.path().join("token.json"));
        let credential = credential();

        cache.save(&credential).await.expect("save");
        let loaded = cache.load().await.expect("load");

        assert_eq!(loaded, Some(credential));
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("token.json");
        std::fs::write(&path, b"\x80\x04not json").expect("write");

        let cache = FileCredentialCache::new(TokioFileSystem::new(), path);
        let err = cache.load().await.unwrap_err();

        assert!(matches!(err, CacheError::Serialization(_)));
    }
}
