pub mod api;
pub mod calculations;
pub mod models;
pub mod workflow;

pub use api::client::{ApiError, PracticeApi};
pub use models::*;
