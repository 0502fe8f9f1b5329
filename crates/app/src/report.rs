//! Status lines printed at the end of a run.

use std::path::Path;

use formquiz_application::ApplicationError;
use formquiz_domain::{AssemblyError, FormResult, RejectedQuestion};

/// One line per skipped record.
pub fn rejected_lines(rejected: &[RejectedQuestion]) -> Vec<String> {
    rejected
        .iter()
        .map(|r| {
            format!(
                "Skipped question {} ('{}'): {}",
                r.position + 1,
                r.text,
                r.reason
            )
        })
        .collect()
}

/// Summary of a finished assembly run.
pub fn summary_lines(result: &FormResult) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(error) = &result.scaffold_error {
        lines.push("--- Form Processing Failed ---".to_string());
        lines.push(format!("{error}. No form was created."));
        return lines;
    }

    let heading = if result.is_complete() {
        "--- Form Processing Completed ---"
    } else {
        "--- Form Processing Finished With Errors ---"
    };
    lines.push(heading.to_string());

    match (&result.responder_uri, &result.form_id) {
        (Some(uri), _) => lines.push(format!("Form URI: {uri}")),
        (None, Some(id)) => lines.push(format!("Form ID: {id}")),
        (None, None) => {}
    }

    match &result.quiz_error {
        None if result.quiz_enabled => lines.push("Quiz setup: ok".to_string()),
        Some(error) => lines.push(format!("Quiz setup: {error}")),
        None => lines.push("Quiz setup: not attempted".to_string()),
    }

    match &result.questions_error {
        None if result.questions_committed => {
            lines.push(format!("Questions added: {}", result.questions_added));
        }
        Some(error @ AssemblyError::EmptyBatch { .. }) => {
            lines.push(format!("Questions: none added, {error}"));
        }
        Some(error @ AssemblyError::RemoteCallFailure { .. }) => {
            lines.push(format!("Questions: {error}"));
        }
        None => lines.push("Questions: not attempted".to_string()),
    }

    lines.extend(rejected_lines(&result.rejected));

    if !result.is_complete()
        && let Some(id) = &result.form_id
    {
        lines.push(format!(
            "The form (ID: {id}) was created but may be partially configured."
        ));
    }

    lines
}

/// Lines explaining why a run stopped early.
pub fn error_lines(error: &ApplicationError, client_secrets: &Path) -> Vec<String> {
    let mut lines = vec![format!("Error: {error}")];
    if error.is_auth_config_missing() {
        lines.push(
            "Download your OAuth 2.0 client secrets file from the Google Cloud Console"
                .to_string(),
        );
        lines.push(format!(
            "and save it as '{}', or point --client-secrets at it.",
            client_secrets.display()
        ));
    }
    lines
}
