use serde::{Deserialize, Serialize};

/// A patient record as returned by the practice API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The selected patient as stored on a treatment draft: identifier plus a
/// denormalized display name so the review step needs no second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    pub id: String,
    pub display_name: String,
}

impl From<&Patient> for PatientRef {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            display_name: patient.full_name(),
        }
    }
}
