//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data flow
//!
//! One direction, per the catalog contract:
//!
//! ```text
//! scroll event → near-bottom check → Action::AdvancePage
//!     → Effect::FetchPage → tokio task → Action::PageLoaded (mpsc)
//!     → items appended → filter(search_term) → grid
//! ```
//!
//! The scroll monitor runs on every raw scroll event with no debounce;
//! the check is O(1) and the reducer's in-flight guard makes repeated
//! triggers idempotent. The crossterm listener is torn down on every exit
//! path by `ratatui::restore` plus the mode guard's `Drop`.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::api::{CatalogItem, CatalogSource, HttpCatalogSource, PageFetch};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{GridState, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Keys navigate the grid; `/` jumps to the search box, `q` quits.
    Browse,
    /// Keystrokes edit the search term. Esc returns to Browse.
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub grid: GridState,
    pub focus: FocusMode,
}

impl TuiState {
    pub fn new(bottom_threshold: u16, tile_width: u16) -> Self {
        Self {
            search_box: SearchBox::new(),
            grid: GridState::new(bottom_threshold, tile_width),
            focus: FocusMode::Browse,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture for wheel scrolling; the cursor stays hidden, the
        // search box draws its own marker.
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn CatalogSource> = Arc::new(HttpCatalogSource::new(
        config.api_base_url.clone(),
        config.image_base_url.clone(),
    ));
    let mut app = App::new(source, config.title.clone());
    let mut tui = TuiState::new(config.bottom_threshold, config.tile_width);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background fetch tasks
    let (tx, rx) = mpsc::channel();

    // Mount: fetch page 1.
    let mut should_quit = dispatch(&mut app, Action::ViewMounted, &tx);
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        tui.search_box.focused = matches!(tui.focus, FocusMode::Search);

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;

            // Lazy thumbnails: tiles request their poster the first time
            // they appear on screen. The reducer drops repeats.
            let visible = tui.grid.visible_indices.clone();
            for index in visible {
                if dispatch(&mut app, Action::RequestPoster(index), &tx) {
                    should_quit = true;
                }
            }
        }

        // Short poll while a fetch is in flight so its completion shows
        // promptly; relaxed when idle.
        let timeout = if app.is_loading {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if dispatch(&mut app, Action::Quit, &tx) {
                    should_quit = true;
                }
                continue;
            }

            // Scroll events always go to the grid regardless of mode,
            // then the scroll monitor check runs on the new offset.
            if matches!(
                tui_event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToTop
                    | TuiEvent::ScrollToBottom
            ) {
                tui.grid.handle_event(&tui_event);
                if tui.grid.near_bottom() && dispatch(&mut app, Action::AdvancePage, &tx) {
                    should_quit = true;
                }
                continue;
            }

            // Modal event dispatch
            match tui.focus {
                FocusMode::Search => {
                    if matches!(tui_event, TuiEvent::Escape) {
                        tui.focus = FocusMode::Browse;
                        continue;
                    }
                    if let Some(SearchEvent::TermChanged(term)) =
                        tui.search_box.handle_event(&tui_event)
                    {
                        if dispatch(&mut app, Action::SearchChanged(term), &tx) {
                            should_quit = true;
                        }
                    }
                }
                FocusMode::Browse => match tui_event {
                    // `/` stands in for the search icon: focus the input.
                    TuiEvent::InputChar('/') => {
                        tui.focus = FocusMode::Search;
                    }
                    TuiEvent::InputChar('q') | TuiEvent::Escape => {
                        if dispatch(&mut app, Action::Quit, &tx) {
                            should_quit = true;
                        }
                    }
                    _ => {}
                },
            }
        }

        // Handle background task actions (fetch completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                should_quit = true;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs the reducer and executes the resulting effect. Returns true when
/// the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::FetchPage(page) => {
            spawn_page_fetch(app.source.clone(), page, tx.clone());
            false
        }
        Effect::FetchPoster(index) => {
            if let Some(item) = app.items.get(index).cloned() {
                spawn_poster_fetch(app.source.clone(), item, index, tx.clone());
            }
            false
        }
        Effect::Quit => true,
        Effect::None => false,
    }
}

fn spawn_page_fetch(source: Arc<dyn CatalogSource>, page: u32, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch for page {}", page);
    tokio::spawn(async move {
        let action = match source.fetch_page(page).await {
            Ok(PageFetch::Items(items)) => Action::PageLoaded(items),
            Ok(PageFetch::EndOfCatalog) => Action::CatalogExhausted,
            Err(e) => Action::FetchFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send page {} result: receiver dropped", page);
        }
    });
}

fn spawn_poster_fetch(
    source: Arc<dyn CatalogSource>,
    item: CatalogItem,
    index: usize,
    tx: mpsc::Sender<Action>,
) {
    debug!("Spawning poster fetch for '{}' (index {})", item.name, index);
    tokio::spawn(async move {
        let action = match source.fetch_poster(&item).await {
            Ok(bytes) => {
                debug!("Poster for '{}' resolved ({} bytes)", item.name, bytes);
                Action::PosterResolved(index)
            }
            Err(e) => {
                // Diagnostic only; the tile stays blurred.
                warn!("Poster fetch for '{}' failed: {}", item.name, e);
                Action::PosterFailed(index)
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send poster result for index {}: receiver dropped", index);
        }
    });
}
