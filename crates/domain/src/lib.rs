//! Formquiz Domain - Core business types
//!
//! This crate defines the domain model for building graded Google Forms
//! quizzes. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod form;
pub mod question;

pub use auth::{AuthError, ClientSecrets, Credential, CredentialState, OAuth2Token};
pub use error::{QuestionError, QuestionResult};
pub use form::{
    AssemblyError, BatchUpdateRequest, CreatedForm, FormResult, FormStep, NewForm, QuestionBatch,
    RejectedQuestion,
};
pub use question::{QuestionRecord, sample_questions};
