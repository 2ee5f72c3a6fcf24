//! # Actions
//!
//! Everything that can happen in Marquee becomes an `Action`.
//! User scrolls near the bottom? That's `Action::AdvancePage`.
//! A page fetch resolves? That's `Action::PageLoaded(items)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the event loop to execute. No
//! I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the pagination contract testable without a terminal or a
//! network: feed actions, assert on state and effects.

use log::{info, warn};

use crate::api::CatalogItem;
use crate::core::state::{App, PosterState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The view mounted; kicks off the fetch of page 1.
    ViewMounted,
    /// The scroll monitor crossed the bottom threshold.
    AdvancePage,
    /// A page fetch decoded successfully.
    PageLoaded(Vec<CatalogItem>),
    /// A page request returned non-success. End of catalog and fetch
    /// failure are deliberately not distinguished.
    CatalogExhausted,
    /// Transport or parse failure. Logged and swallowed; pagination may
    /// still be retriggered by further scrolling.
    FetchFailed(String),
    /// The search box content changed.
    SearchChanged(String),
    /// A tile became visible and wants its poster.
    RequestPoster(usize),
    /// Background poster fetch finished.
    PosterResolved(usize),
    PosterFailed(usize),
    Quit,
}

/// Side effects the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a background fetch for the given 1-based page.
    FetchPage(u32),
    /// Spawn a background poster fetch for the item at this index.
    FetchPoster(usize),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ViewMounted => {
            // Guarded for symmetry with AdvancePage; on a fresh App both
            // conditions always pass.
            if !app.has_more_pages || app.is_loading {
                return Effect::None;
            }
            app.is_loading = true;
            Effect::FetchPage(app.current_page)
        }

        Action::AdvancePage => {
            if !app.has_more_pages {
                return Effect::None;
            }
            // Single in-flight guard: ignore advances while a fetch is
            // outstanding, so append order equals trigger order.
            if app.is_loading {
                return Effect::None;
            }
            app.current_page += 1;
            app.is_loading = true;
            Effect::FetchPage(app.current_page)
        }

        Action::PageLoaded(new_items) => {
            app.is_loading = false;
            info!(
                "Page {} loaded: {} items (total {})",
                app.current_page,
                new_items.len(),
                app.items.len() + new_items.len()
            );
            app.poster_states
                .extend(std::iter::repeat_n(PosterState::Pending, new_items.len()));
            app.items.extend(new_items);
            app.status_message = format!("{} titles loaded", app.items.len());
            Effect::None
        }

        Action::CatalogExhausted => {
            app.is_loading = false;
            if app.has_more_pages {
                info!("Catalog exhausted at page {}", app.current_page);
                app.has_more_pages = false;
            }
            app.status_message = format!("{} titles · end of catalog", app.items.len());
            Effect::None
        }

        Action::FetchFailed(msg) => {
            // Diagnostic only: no exhaustion, no user-visible error.
            warn!("Page {} fetch failed: {}", app.current_page, msg);
            app.is_loading = false;
            Effect::None
        }

        Action::SearchChanged(term) => {
            app.search_term = term;
            Effect::None
        }

        Action::RequestPoster(index) => {
            match app.poster_states.get(index) {
                Some(PosterState::Pending) => {
                    app.poster_states[index] = PosterState::Requested;
                    Effect::FetchPoster(index)
                }
                // Already requested, resolved, failed, or out of range.
                _ => Effect::None,
            }
        }

        Action::PosterResolved(index) => {
            if let Some(state) = app.poster_states.get_mut(index) {
                *state = PosterState::Resolved;
            }
            Effect::None
        }

        Action::PosterFailed(index) => {
            if let Some(state) = app.poster_states.get_mut(index) {
                *state = PosterState::Failed;
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
