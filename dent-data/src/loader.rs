//! CSV loader for the treatment-category catalog.
//!
//! ## CSV Format
//!
//! Headers are matched by name (column order does not matter) and values
//! are trimmed of surrounding whitespace.
//!
//! | Column        | Required | Type    | Notes                          |
//! |---------------|----------|---------|--------------------------------|
//! | `id`          | yes      | string  | unique within the file         |
//! | `name`        | yes      | string  | display name                   |
//! | `description` | no       | string  | leave empty for none           |
//! | `base_cost`   | yes      | decimal | must be greater than zero      |
//!
//! ### Example
//!
//! ```csv
//! id,name,description,base_cost
//! c1,Filling,Composite filling,1500.00
//! c2,Root Canal,,8000.00
//! ```

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use dent_core::{CategoryCatalog, TreatmentCategory};

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("empty category id on row {0}")]
    EmptyId(usize),

    #[error("empty name for category '{id}' on row {row}")]
    EmptyName { id: String, row: usize },

    #[error("base cost must be positive for category '{id}' on row {row} (got {cost})")]
    NonPositiveBaseCost {
        id: String,
        row: usize,
        cost: Decimal,
    },

    #[error("duplicate category id '{id}' on row {row}")]
    DuplicateId { id: String, row: usize },
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvParse(err.to_string())
    }
}

/// A single record from the catalog CSV file.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    base_cost: Decimal,
}

/// Loader for treatment-category catalog CSV files.
///
/// Parsing validates each row (non-empty id and name, positive base cost)
/// and rejects duplicate ids, so a parsed file is always a usable catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse catalog categories from a CSV reader. Rows come back in file
    /// order. Row numbers in errors are 1-based (header = row 0).
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TreatmentCategory>, CatalogLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut categories: Vec<TreatmentCategory> = Vec::new();

        for (idx, result) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
            let record = result?;
            let row = idx + 1;

            if record.id.is_empty() {
                return Err(CatalogLoadError::EmptyId(row));
            }
            if record.name.is_empty() {
                return Err(CatalogLoadError::EmptyName {
                    id: record.id,
                    row,
                });
            }
            if record.base_cost <= Decimal::ZERO {
                return Err(CatalogLoadError::NonPositiveBaseCost {
                    id: record.id,
                    row,
                    cost: record.base_cost,
                });
            }
            if categories.iter().any(|c| c.id == record.id) {
                return Err(CatalogLoadError::DuplicateId {
                    id: record.id,
                    row,
                });
            }

            categories.push(TreatmentCategory {
                id: record.id,
                name: record.name,
                description: record.description.filter(|d| !d.is_empty()),
                base_cost: record.base_cost,
            });
        }

        Ok(categories)
    }

    /// Convenience wrapper: parse a full file's contents.
    pub fn load_from_str(input: &str) -> Result<Vec<TreatmentCategory>, CatalogLoadError> {
        Self::parse(input.as_bytes())
    }

    /// Parse and wrap into the session-wide catalog snapshot.
    pub fn load_catalog<R: Read>(reader: R) -> Result<CategoryCatalog, CatalogLoadError> {
        Ok(CategoryCatalog::new(Self::parse(reader)?))
    }
}
