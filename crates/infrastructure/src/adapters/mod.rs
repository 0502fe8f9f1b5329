//! Adapters implementing application ports

mod reqwest_forms_client;
mod system_clock;

pub use reqwest_forms_client::ReqwestFormsClient;
pub use system_clock::SystemClock;
