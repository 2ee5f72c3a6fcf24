//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{CatalogItem, CatalogSource, PageFetch, SourceError};
use crate::core::state::App;

/// A scripted source: serves the given pages in order, then end-of-catalog.
pub struct ScriptedSource {
    pages: Vec<Vec<CatalogItem>>,
}

impl ScriptedSource {
    pub fn new(pages: Vec<Vec<CatalogItem>>) -> Self {
        Self { pages }
    }

    pub fn empty() -> Self {
        Self { pages: Vec::new() }
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_page(&self, page: u32) -> Result<PageFetch, SourceError> {
        match self.pages.get(page as usize - 1) {
            Some(items) => Ok(PageFetch::Items(items.clone())),
            None => Ok(PageFetch::EndOfCatalog),
        }
    }

    fn poster_url(&self, item: &CatalogItem) -> String {
        format!("scripted://{}", item.poster_image)
    }

    async fn fetch_poster(&self, _item: &CatalogItem) -> Result<usize, SourceError> {
        Ok(0)
    }
}

/// Builds catalog items from names; poster paths are derived.
pub fn items(names: &[&str]) -> Vec<CatalogItem> {
    names
        .iter()
        .map(|name| CatalogItem {
            name: name.to_string(),
            poster_image: format!("{}.jpg", name.to_lowercase()),
        })
        .collect()
}

/// Creates a test App backed by an empty scripted source.
pub fn test_app() -> App {
    App::new(Arc::new(ScriptedSource::empty()), "Test Catalog".to_string())
}
