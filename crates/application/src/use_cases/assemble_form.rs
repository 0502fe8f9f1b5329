//! Assemble Form Use Case
//!
//! Creates a form, switches it to quiz mode and inserts the questions.
//! Only a failure to create the form stops the sequence; the later steps
//! record their failure in the `FormResult` and the run carries on.

use std::sync::Arc;

use formquiz_domain::{
    AssemblyError, BatchUpdateRequest, FormResult, FormStep, NewForm, QuestionBatch,
    QuestionRecord,
};
use tracing::{debug, info, warn};

use crate::ports::FormsApi;

/// Use case for building a quiz form from question records.
///
/// # Example
///
/// ```ignore
/// let api = ReqwestFormsClient::new(&config.api_base_url, &credential)?;
/// let assembler = FormAssembler::new(Arc::new(api));
///
/// let result = assembler.create("Geography Quiz", "Geography Quiz", &questions).await;
/// println!("{:?}", result.form_id);
/// ```
pub struct FormAssembler<F: FormsApi> {
    api: Arc<F>,
}

impl<F: FormsApi> FormAssembler<F> {
    /// Creates a new `FormAssembler` over the given API client.
    pub const fn new(api: Arc<F>) -> Self {
        Self { api }
    }

    /// Validates the questions and builds the insertion batch without
    /// calling the API. Rejected records are logged as warnings.
    #[must_use]
    pub fn prepare_batch(questions: &[QuestionRecord]) -> QuestionBatch {
        let batch = QuestionBatch::build(questions);
        for rejected in batch.rejected() {
            warn!(
                position = rejected.position,
                question = %rejected.text,
                reason = %rejected.reason,
                "Skipping invalid question"
            );
        }
        batch
    }

    /// Runs create → enable quiz → insert questions.
    ///
    /// Never fails as a whole; inspect the returned `FormResult` for the
    /// outcome of each step.
    pub async fn create(
        &self,
        title: &str,
        doc_title: &str,
        questions: &[QuestionRecord],
    ) -> FormResult {
        let mut result = FormResult::default();

        info!(title, "Creating form");
        let created = match self.api.create_form(&NewForm::new(title, doc_title)).await {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "Form creation failed");
                result.scaffold_error = Some(AssemblyError::RemoteCallFailure {
                    step: FormStep::Scaffold,
                    message: e.to_string(),
                });
                return result;
            }
        };
        info!(form_id = %created.form_id, "Form scaffold created");
        result.form_id = Some(created.form_id.clone());
        result.responder_uri = created.responder_uri;

        self.enable_quiz(&created.form_id, &mut result).await;
        self.add_questions(&created.form_id, questions, &mut result).await;

        result
    }

    async fn enable_quiz(&self, form_id: &str, result: &mut FormResult) {
        match self
            .api
            .batch_update(form_id, &BatchUpdateRequest::enable_quiz())
            .await
        {
            Ok(()) => {
                info!(form_id, "Form configured as a quiz");
                result.quiz_enabled = true;
            }
            Err(e) => {
                warn!(form_id, error = %e, "Could not configure form as a quiz; adding questions anyway");
                result.quiz_error = Some(AssemblyError::RemoteCallFailure {
                    step: FormStep::QuizSettings,
                    message: e.to_string(),
                });
            }
        }
    }

    async fn add_questions(
        &self,
        form_id: &str,
        questions: &[QuestionRecord],
        result: &mut FormResult,
    ) {
        let (batch, rejected) = Self::prepare_batch(questions).into_parts();
        result.rejected = rejected;

        if batch.is_empty() {
            warn!(form_id, "No valid questions to add after validation");
            result.questions_error = Some(AssemblyError::EmptyBatch {
                rejected: result.rejected.len(),
            });
            return;
        }

        debug!(form_id, requests = batch.len(), "Submitting question batch");
        match self.api.batch_update(form_id, &batch).await {
            Ok(()) => {
                info!(form_id, count = batch.len(), "Questions added");
                result.questions_committed = true;
                result.questions_added = batch.len();
            }
            Err(e) => {
                warn!(form_id, error = %e, "Adding questions failed");
                result.questions_error = Some(AssemblyError::RemoteCallFailure {
                    step: FormStep::Questions,
                    message: e.to_string(),
                });
            }
        }
    }
}
