//! Real file system implementation.

use std::path::Path;

use formquiz_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                FileSystemError::PermissionDenied(path.to_path_buf())
            }
            _ => FileSystemError::Io(e),
        })
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                FileSystemError::PermissionDenied(path.to_path_buf())
            } else {
                FileSystemError::Io(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_and_reads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("token.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"{}").await.expect("write");
        assert!(path.parent().expect("parent").is_dir());
        assert_eq!(fs.read_file(&path).await.expect("read"), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let err = TokioFileSystem::new().read_file(&path).await.unwrap_err();
        assert!(matches!(err, FileSystemError::NotFound(p) if p == path));
    }
}
