//! Authentication domain types

mod types;

pub use types::{
    AuthError, ClientSecrets, Credential, CredentialState, GOOGLE_AUTH_URI, GOOGLE_TOKEN_URI,
    OAuth2Token,
};
