//! Wire types for the catalog API.
//!
//! A page response nests the item list three levels deep:
//!
//! ```text
//! { "page": { "content-items": { "content": [ { "name", "poster-image" }, ... ] } } }
//! ```
//!
//! The envelope carries other fields (title, page counters) that the client
//! does not need; serde ignores them.

use serde::Deserialize;

/// One catalog entry. Identity is positional (index in the accumulated
/// list) — duplicate names are allowed and never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    #[serde(rename = "poster-image")]
    pub poster_image: String,
}

/// Decoded body of one page request.
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub page: PageBody,
}

#[derive(Debug, Deserialize)]
pub struct PageBody {
    #[serde(rename = "content-items")]
    pub content_items: ContentItems,
}

#[derive(Debug, Deserialize)]
pub struct ContentItems {
    pub content: Vec<CatalogItem>,
}

impl PageResponse {
    /// Flattens the envelope down to the ordered item list.
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.page.content_items.content
    }
}
