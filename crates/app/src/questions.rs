//! Loading question records from a JSON file.

use std::path::Path;

use formquiz_application::ports::{FileSystem, FileSystemError};
use formquiz_application::{ApplicationError, ApplicationResult};
use formquiz_domain::QuestionRecord;
use formquiz_infrastructure::from_json_bytes;

/// Reads a JSON array of `{text, options, correct_index, points}`.
///
/// Records are not validated here; invalid ones are dropped when the
/// batch is built.
///
/// # Errors
///
/// `ApplicationError::Input` if the file is missing or malformed.
pub async fn load_questions<F: FileSystem>(
    fs: &F,
    path: &Path,
) -> ApplicationResult<Vec<QuestionRecord>> {
    let bytes = fs.read_file(path).await.map_err(|e| match e {
        FileSystemError::NotFound(_) => {
            ApplicationError::Input(format!("question file not found: {}", path.display()))
        }
        FileSystemError::PermissionDenied(_) => ApplicationError::Input(format!(
            "question file not readable: {}",
            path.display()
        )),
        FileSystemError::Io(e) => ApplicationError::Io(e),
    })?;

    from_json_bytes(&bytes)
        .map_err(|e| ApplicationError::Input(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use formquiz_infrastructure::TokioFileSystem;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_questions_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[
                {"text": "Capital of France?", "options": ["Rome", "Paris"], "correct_index": 1, "points": 10},
                {"text": "Broken", "options": ["a", "b"], "correct_index": 7, "points": -1}
            ]"#,
        )
        .unwrap();

        let questions = load_questions(&TokioFileSystem::new(), &path).await.unwrap();

        assert_eq!(
            questions,
            vec![
                QuestionRecord::new("Capital of France?", ["Rome", "Paris"], 1, 10),
                QuestionRecord::new("Broken", ["a", "b"], 7, -1),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_questions(&TokioFileSystem::new(), &dir.path().join("none.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Input(m) if m.contains("not found")));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"text": "not an array"}"#).unwrap();

        let err = load_questions(&TokioFileSystem::new(), &path)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Input(_)));
    }
}
