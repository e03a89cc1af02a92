//! Patient selection for step 1.
//!
//! The candidate list is fetched once when the session starts and filtered
//! entirely in memory; there is no incremental fetch or pagination here.

use crate::models::{Patient, PatientRef};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientSelector {
    patients: Vec<Patient>,
    query: String,
}

impl PatientSelector {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            query: String::new(),
        }
    }

    /// The full, unfiltered candidate list.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Candidates matching the stored query.
    pub fn results(&self) -> Vec<&Patient> {
        self.search(&self.query)
    }

    /// Case-insensitive substring match against full name, phone, and
    /// email. An empty query returns the full list.
    pub fn search(&self, query: &str) -> Vec<&Patient> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.patients.iter().collect();
        }
        self.patients
            .iter()
            .filter(|p| {
                p.full_name().to_lowercase().contains(&needle)
                    || p.phone
                        .as_deref()
                        .is_some_and(|phone| phone.to_lowercase().contains(&needle))
                    || p.email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// The selection result stored on the draft.
    pub fn select(&self, patient: &Patient) -> PatientRef {
        PatientRef::from(patient)
    }
}
