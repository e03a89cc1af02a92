pub mod loader;

pub use loader::{CatalogLoadError, CatalogLoader};
