//! Authentication module for Formquiz.
//!
//! This module provides:
//! - The credential provider (cache, then refresh, then interactive flow)
//! - Events reported while an `OAuth2` flow runs

mod credential_provider;
mod events;

pub use credential_provider::{CredentialProvider, token_preview};
pub use events::AuthEvent;
