//! # Application State
//!
//! Core business state for Marquee. This module contains domain data only -
//! no TUI-specific types. Presentation state (scroll offsets, focus) lives
//! in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn CatalogSource>  // catalog API
//! ├── catalog_title: String           // header title
//! ├── items: Vec<CatalogItem>         // accumulated pages, append-only
//! ├── poster_states: Vec<PosterState> // parallel to items
//! ├── search_term: String             // live filter input
//! ├── current_page: u32               // last page requested (1-based)
//! ├── has_more_pages: bool            // exhaustion latch
//! ├── is_loading: bool                // single in-flight fetch guard
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.
//!
//! Invariants maintained by the reducer:
//! - `items` grows monotonically; pages are appended in trigger order and
//!   never reordered or dropped.
//! - `current_page` increases by exactly 1 per accepted advance.
//! - `has_more_pages` transitions true→false at most once and never back.

use std::sync::Arc;

use crate::api::{CatalogItem, CatalogSource};

/// Lazy-load lifecycle of one item's poster thumbnail.
///
/// A tile renders blurred (dimmed) until its poster resolves, then
/// brightens. Failed posters stay blurred; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterState {
    /// Not yet requested. Tiles only request on first becoming visible.
    Pending,
    /// A background fetch is in flight.
    Requested,
    /// The poster fetched successfully.
    Resolved,
    /// The fetch failed; logged and left alone.
    Failed,
}

pub struct App {
    pub source: Arc<dyn CatalogSource>,
    pub catalog_title: String,
    pub items: Vec<CatalogItem>,
    /// One entry per accumulated item, same index.
    pub poster_states: Vec<PosterState>,
    pub search_term: String,
    /// Last page number requested (1-based). Page 1 is fetched on mount.
    pub current_page: u32,
    /// False once any page request returns non-success. Latched.
    pub has_more_pages: bool,
    /// True while a page fetch is outstanding. Serializes fetches so a
    /// rapid scroll burst cannot trigger overlapping requests.
    pub is_loading: bool,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn CatalogSource>, catalog_title: String) -> Self {
        Self {
            source,
            catalog_title,
            items: Vec::new(),
            poster_states: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            has_more_pages: true,
            is_loading: false,
            status_message: String::from("Loading catalog..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.items.is_empty());
        assert!(app.poster_states.is_empty());
        assert_eq!(app.search_term, "");
        assert_eq!(app.current_page, 1);
        assert!(app.has_more_pages);
        assert!(!app.is_loading);
        assert_eq!(app.status_message, "Loading catalog...");
    }
}
