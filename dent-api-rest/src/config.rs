//! TOML-backed settings for the REST backend.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dent_core::api::ApiConfig;
use serde::Deserialize;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings file shape:
///
/// ```toml
/// backend = "rest"
/// base_url = "https://api.practice.example"
/// timeout_secs = 30
/// ```
///
/// `backend` and `timeout_secs` are optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestSettings {
    #[serde(default = "default_backend")]
    pub backend: String,
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend() -> String {
    "rest".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RestSettings {
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).context("invalid API settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The backend-agnostic config handed to the client registry.
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            backend: self.backend.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_full_settings() {
        let settings = RestSettings::from_toml(
            "backend = \"rest\"\nbase_url = \"https://api.practice.example\"\ntimeout_secs = 5\n",
        )
        .expect("valid settings");

        assert_eq!(settings.backend, "rest");
        assert_eq!(settings.base_url, "https://api.practice.example");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn backend_and_timeout_default() {
        let settings = RestSettings::from_toml("base_url = \"http://localhost:8080\"\n")
            .expect("base_url alone is enough");

        assert_eq!(settings.backend, "rest");
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn missing_base_url_is_an_error() {
        assert!(RestSettings::from_toml("backend = \"rest\"\n").is_err());
    }

    #[test]
    fn converts_to_api_config() {
        let settings =
            RestSettings::from_toml("base_url = \"http://localhost:8080\"\n").expect("valid");

        let config = settings.to_api_config();

        assert_eq!(config.backend, "rest");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
