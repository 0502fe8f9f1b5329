//! Formquiz Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the Forms API, credential storage and `OAuth2`)
//! - The credential provider
//! - The form assembly use case
//! - Application-level configuration and errors

pub mod auth;
pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{AuthEvent, CredentialProvider, token_preview};
pub use config::AppConfig;
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::FormAssembler;
