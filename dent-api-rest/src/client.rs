//! The reqwest-backed implementation of the practice API.
//!
//! Endpoint layout:
//!
//! | Operation          | Request                    |
//! |--------------------|----------------------------|
//! | `fetch_patients`   | `GET  {base}/patients`     |
//! | `fetch_treatment`  | `GET  {base}/treatments/id`|
//! | `create_treatment` | `POST {base}/treatments`   |
//! | `update_treatment` | `PUT  {base}/treatments/id`|
//!
//! All bodies are JSON. Retry policy, auth headers, and token refresh live
//! with the caller's `reqwest::Client` middleware, not here.

use std::time::Duration;

use async_trait::async_trait;
use dent_core::api::payload::{TreatmentPayload, TreatmentRecord};
use dent_core::{ApiError, Patient, PracticeApi};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Builds a client against `base_url` with the given request timeout.
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Wraps an existing `reqwest::Client` (shared pool, custom middleware).
    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Maps the HTTP outcome onto the collaborator error taxonomy and
    /// decodes the JSON body on success.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn transport(e: reqwest::Error) -> ApiError {
        ApiError::Transport(e.to_string())
    }
}

#[async_trait]
impl PracticeApi for RestClient {
    async fn fetch_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let response = self
            .http
            .get(self.url("patients"))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn fetch_treatment(&self, id: &str) -> Result<TreatmentRecord, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("treatments/{id}")))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn create_treatment(
        &self,
        payload: &TreatmentPayload,
    ) -> Result<TreatmentRecord, ApiError> {
        let response = self
            .http
            .post(self.url("treatments"))
            .json(payload)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn update_treatment(
        &self,
        id: &str,
        payload: &TreatmentPayload,
    ) -> Result<TreatmentRecord, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("treatments/{id}")))
            .json(payload)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}
