use async_trait::async_trait;
use thiserror::Error;

use crate::api::payload::{TreatmentPayload, TreatmentRecord};
use crate::models::Patient;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Record not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response decode error: {0}")]
    Decode(String),
}

/// The practice REST API as consumed by the intake workflow.
///
/// Transport and auth are backend concerns; the workflow only sees these
/// four logical operations.
#[async_trait]
pub trait PracticeApi: Send + Sync {
    /// The patient candidate list, fetched once at workflow start.
    async fn fetch_patients(&self) -> Result<Vec<Patient>, ApiError>;

    /// An existing treatment record (edit mode only).
    async fn fetch_treatment(&self, id: &str) -> Result<TreatmentRecord, ApiError>;

    async fn create_treatment(
        &self,
        payload: &TreatmentPayload,
    ) -> Result<TreatmentRecord, ApiError>;

    async fn update_treatment(
        &self,
        id: &str,
        payload: &TreatmentPayload,
    ) -> Result<TreatmentRecord, ApiError>;
}
