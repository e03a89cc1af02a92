pub mod client;
pub mod factory;
pub mod payload;

pub use client::{ApiError, PracticeApi};
pub use factory::{ApiConfig, ClientFactory, ClientRegistry};
pub use payload::{TreatmentPayload, TreatmentRecord};
