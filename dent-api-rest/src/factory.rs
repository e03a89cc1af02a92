use std::time::Duration;

use async_trait::async_trait;

use dent_core::api::{ApiConfig, ClientFactory};
use dent_core::{ApiError, PracticeApi};

use crate::client::RestClient;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`ClientFactory`] for the REST backend.
///
/// Register this with a [`dent_core::api::ClientRegistry`] to make the
/// `"rest"` backend available:
///
/// ```rust,no_run
/// use dent_core::api::ClientRegistry;
/// use dent_api_rest::RestClientFactory;
///
/// let mut registry = ClientRegistry::new();
/// registry.register(Box::new(RestClientFactory));
/// ```
pub struct RestClientFactory;

#[async_trait]
impl ClientFactory for RestClientFactory {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    /// Build a client against `config.base_url` with the default timeout.
    /// Use [`RestClient::new`] directly when a custom timeout is needed.
    async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn PracticeApi>, ApiError> {
        let client = RestClient::new(&config.base_url, DEFAULT_TIMEOUT)?;
        Ok(Box::new(client))
    }
}
