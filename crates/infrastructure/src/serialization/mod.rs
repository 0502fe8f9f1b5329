//! JSON serialization for the credential cache and request previews.

mod json;

pub use json::*;
