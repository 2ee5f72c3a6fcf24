pub mod source;
pub mod types;

pub use source::{CatalogSource, HttpCatalogSource, PageFetch, SourceError};
pub use types::{CatalogItem, PageResponse};
