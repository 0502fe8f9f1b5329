//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod authorization;
mod clock;
mod credential_cache;
mod file_system;
mod forms_api;

pub use authorization::{AuthorizationServer, ClientSecretsSource};
pub use clock::Clock;
pub use credential_cache::{CacheError, CredentialCache};
pub use file_system::{FileSystem, FileSystemError};
pub use forms_api::{FormsApi, FormsApiError};
