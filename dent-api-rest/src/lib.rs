pub mod client;
pub mod config;
pub mod factory;

pub use client::RestClient;
pub use config::RestSettings;
pub use factory::RestClientFactory;
