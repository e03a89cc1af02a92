use std::collections::HashMap;

use async_trait::async_trait;

use super::client::{ApiError, PracticeApi};

/// Backend-agnostic client configuration.
///
/// `backend` must match the [`ClientFactory::backend_name`] of a registered
/// factory. `base_url` is passed through to that factory unchanged — its
/// meaning is backend-specific (a REST backend reads it as the server root;
/// an offline stub may ignore it).
///
/// | backend | base_url examples                      |
/// |---------|----------------------------------------|
/// | `rest`  | `https://api.practice.example`         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"rest"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "rest".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// One implementation per API backend. Each backend crate exports a single
/// unit struct that implements this trait and is registered with a
/// [`ClientRegistry`] at startup.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use client for `config`.
    async fn create(&self, config: &ApiConfig) -> Result<Box<dyn PracticeApi>, ApiError>;
}

/// Registry of [`ClientFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `ClientRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` whenever a new client is needed.
pub struct ClientRegistry {
    factories: HashMap<&'static str, Box<dyn ClientFactory>>,
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`ClientFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(&mut self, factory: Box<dyn ClientFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return the
    /// client it produces.
    ///
    /// # Errors
    /// * [`ApiError::Transport`] — no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn PracticeApi>, ApiError> {
        let factory = self.factories.get(config.backend.as_str()).ok_or_else(|| {
            ApiError::Transport(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            ))
        })?;

        factory.create(config).await
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
