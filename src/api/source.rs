//! Catalog source abstraction and the HTTP implementation.
//!
//! `CatalogSource` is the seam between the reducer/TUI and the network.
//! The real implementation talks to the catalog API over reqwest; tests
//! substitute a scripted in-memory source.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{CatalogItem, PageResponse};

/// Errors that can occur while talking to the catalog API.
///
/// Note that a non-success HTTP status is *not* an error: the API signals
/// end-of-catalog that way, so it maps to `PageFetch::EndOfCatalog`.
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The response body did not match the expected envelope.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Outcome of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// The page decoded successfully; items are in within-page order.
    Items(Vec<CatalogItem>),
    /// Any non-success status. The API does not distinguish "past the last
    /// page" from a failing endpoint, and neither do we.
    EndOfCatalog,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the name of the source (for logging).
    fn name(&self) -> &str;

    /// Fetches one page of the catalog. Pages are 1-based.
    async fn fetch_page(&self, page: u32) -> Result<PageFetch, SourceError>;

    /// Absolute URL for an item's poster image.
    fn poster_url(&self, item: &CatalogItem) -> String;

    /// Resolves an item's poster by fetching it. Returns the byte length on
    /// success; the terminal never rasterizes the bitmap, resolution only
    /// flips the tile out of its blurred placeholder state.
    async fn fetch_poster(&self, item: &CatalogItem) -> Result<usize, SourceError>;
}

/// HTTP-backed catalog source.
///
/// Page URLs are built as `{api_base_url}{page}.json`, matching the API's
/// `/data/page<N>.json` layout (the base URL ends in the literal `page`).
/// Poster URLs are the image base plus the item's relative path, with no
/// validation of the result.
pub struct HttpCatalogSource {
    api_base_url: String,
    image_base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(api_base_url: String, image_base_url: String) -> Self {
        Self {
            api_base_url,
            image_base_url,
            client: reqwest::Client::new(),
        }
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}{}.json", self.api_base_url, page)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_page(&self, page: u32) -> Result<PageFetch, SourceError> {
        let url = self.page_url(page);
        info!("Fetching catalog page {} from {}", page, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Page {} response status: {}", page, status);

        if !status.is_success() {
            info!("Page {} returned {}, treating as end of catalog", page, status);
            return Ok(PageFetch::EndOfCatalog);
        }

        let body: PageResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        let items = body.into_items();
        info!("Page {} decoded: {} items", page, items.len());
        Ok(PageFetch::Items(items))
    }

    fn poster_url(&self, item: &CatalogItem) -> String {
        format!("{}{}", self.image_base_url, item.poster_image)
    }

    async fn fetch_poster(&self, item: &CatalogItem) -> Result<usize, SourceError> {
        let url = self.poster_url(item);
        debug!("Fetching poster {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            warn!("Poster fetch for '{}' returned {}", item.name, response.status());
            return Err(SourceError::Network(format!(
                "poster request returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        debug!("Poster '{}' resolved ({} bytes)", item.poster_image, bytes.len());
        Ok(bytes.len())
    }
}
