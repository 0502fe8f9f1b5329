//! Google `OAuth2` adapters.

mod callback;
mod oauth2_provider;

pub use callback::CallbackListener;
pub use oauth2_provider::{GoogleOAuth2Provider, authorization_url};
