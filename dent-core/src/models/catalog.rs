use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry in the static treatment-category catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_cost: Decimal,
}

/// The immutable catalog snapshot held for a whole intake session.
///
/// Lookup is by id; search is a case-insensitive substring match over name
/// and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<TreatmentCategory>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<TreatmentCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[TreatmentCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TreatmentCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Case-insensitive substring match on name or description.
    /// An empty (or whitespace-only) query matches everything.
    pub fn search(&self, query: &str) -> Vec<&TreatmentCategory> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.categories.iter().collect();
        }
        self.categories
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
