//! Formquiz Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the Google Forms REST client,
//! the Google `OAuth2` flows and file-backed credential storage.

pub mod adapters;
pub mod auth;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestFormsClient, SystemClock};
pub use auth::{CallbackListener, GoogleOAuth2Provider, authorization_url};
pub use persistence::{FileClientSecrets, FileCredentialCache, TokioFileSystem};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
