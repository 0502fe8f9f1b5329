//! Outcome of assembling a quiz form.

use std::fmt;

use thiserror::Error;

use super::batch::RejectedQuestion;

/// The three remote steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    /// `forms.create`
    Scaffold,
    /// `batchUpdate` with `updateSettings`
    QuizSettings,
    /// `batchUpdate` with `createItem` requests
    Questions,
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scaffold => "form creation",
            Self::QuizSettings => "quiz setup",
            Self::Questions => "adding questions",
        };
        f.write_str(name)
    }
}

/// Why a step did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The remote call returned an error.
    #[error("{step} failed: {message}")]
    RemoteCallFailure {
        /// Which step.
        step: FormStep,
        /// Error reported by the transport or the API.
        message: String,
    },

    /// Validation left nothing to submit; no remote call was made.
    #[error("no valid questions to add ({rejected} rejected by validation)")]
    EmptyBatch {
        /// How many records were rejected.
        rejected: usize,
    },
}

impl AssemblyError {
    /// The step this error belongs to.
    #[must_use]
    pub const fn step(&self) -> FormStep {
        match self {
            Self::RemoteCallFailure { step, .. } => *step,
            Self::EmptyBatch { .. } => FormStep::Questions,
        }
    }
}

/// Result of the create → quiz → questions sequence.
///
/// Each step's outcome is recorded independently; a failure in one step
/// is kept here rather than propagated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormResult {
    /// Identifier of the created form; `None` if creation failed.
    pub form_id: Option<String>,
    /// Responder link of the created form.
    pub responder_uri: Option<String>,
    /// Whether quiz mode was switched on.
    pub quiz_enabled: bool,
    /// Whether the question batch was applied.
    pub questions_committed: bool,
    /// Number of questions submitted in the committed batch.
    pub questions_added: usize,
    /// Records excluded by validation.
    pub rejected: Vec<RejectedQuestion>,
    /// Scaffold failure, fatal to the run.
    pub scaffold_error: Option<AssemblyError>,
    /// Quiz-settings failure.
    pub quiz_error: Option<AssemblyError>,
    /// Question-step failure.
    pub questions_error: Option<AssemblyError>,
}

impl FormResult {
    /// Returns true if the form exists remotely.
    #[must_use]
    pub const fn form_created(&self) -> bool {
        self.form_id.is_some()
    }

    /// Returns true if all three steps succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.form_created() && self.quiz_enabled && self.questions_committed
    }

    /// The responder link, falling back to the form ID.
    #[must_use]
    pub fn form_reference(&self) -> Option<&str> {
        self.responder_uri.as_deref().or(self.form_id.as_deref())
    }

    /// All recorded failures, in step order.
    pub fn errors(&self) -> impl Iterator<Item = &AssemblyError> {
        [&self.scaffold_error, &self.quiz_error, &self.questions_error]
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nothing_created() {
        let result = FormResult::default();
        assert!(!result.form_created());
        assert!(!result.is_complete());
        assert_eq!(result.form_reference(), None);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn test_form_reference_prefers_uri() {
        let mut result = FormResult {
            form_id: Some("id".to_string()),
            ..FormResult::default()
        };
        assert_eq!(result.form_reference(), Some("id"));

        result.responder_uri = Some("https://forms.example/id".to_string());
        assert_eq!(result.form_reference(), Some("https://forms.example/id"));
    }

    #[test]
    fn test_error_messages_name_the_step() {
        let remote = AssemblyError::RemoteCallFailure {
            step: FormStep::QuizSettings,
            message: "403 PERMISSION_DENIED".to_string(),
        };
        assert_eq!(remote.to_string(), "quiz setup failed: 403 PERMISSION_DENIED");

        let empty = AssemblyError::EmptyBatch { rejected: 2 };
        assert_eq!(empty.step(), FormStep::Questions);
        assert!(empty.to_string().contains("2 rejected"));
    }
}
