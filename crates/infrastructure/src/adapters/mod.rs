//! Infrastructure adapters

mod reqwest_client;
mod settings;

pub use reqwest_client::ReqwestHttpClient;
pub use settings::ClientSettings;
