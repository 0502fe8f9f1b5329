//! Forms API port

use std::future::Future;

use formquiz_domain::{BatchUpdateRequest, CreatedForm, NewForm};

/// Errors from the remote Forms API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormsApiError {
    /// The request never got an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Google status string such as `PERMISSION_DENIED`.
        reason: Option<String>,
        /// Error message from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for the three Forms API operations the assembler uses.
///
/// `batch_update` covers both the quiz-settings update and the question
/// insertion; they differ only in the requests they carry.
pub trait FormsApi: Send + Sync {
    /// Creates an empty form.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response lacks a form ID.
    fn create_form(
        &self,
        form: &NewForm,
    ) -> impl Future<Output = Result<CreatedForm, FormsApiError>> + Send;

    /// Applies a batch of updates to a form atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; no request in the batch is applied.
    fn batch_update(
        &self,
        form_id: &str,
        batch: &BatchUpdateRequest,
    ) -> impl Future<Output = Result<(), FormsApiError>> + Send;
}
