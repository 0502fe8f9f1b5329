//! File-backed storage for credentials and client secrets.

mod client_secrets;
mod credential_cache;
mod file_system;

pub use client_secrets::FileClientSecrets;
pub use credential_cache::FileCredentialCache;
pub use file_system::TokioFileSystem;
