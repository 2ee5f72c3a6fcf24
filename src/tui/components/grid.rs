//! # PosterGrid Component
//!
//! Scrollable grid of poster tiles with captions. This component also feeds
//! the scroll monitor: it caches the viewport/content heights measured
//! during render so the event loop can run the near-bottom check, and it
//! records which catalog items are currently on screen so their posters can
//! be lazily requested.
//!
//! A tile renders as a bordered poster box above a caption line. Until the
//! item's poster resolves, the box is filled with a dimmed blur pattern;
//! once resolved it brightens into a tint derived from the poster path, the
//! closest a cell grid gets to a thumbnail.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::CatalogItem;
use crate::core::state::PosterState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Height of one tile row: poster box plus caption line.
pub const TILE_HEIGHT: u16 = 9;

/// Scroll and layout state for the grid.
/// Must be persisted in the parent TuiState.
pub struct GridState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Rows from the bottom that count as "near the bottom" (from config)
    pub bottom_threshold: u16,
    /// Tile width in cells (from config)
    pub tile_width: u16,
    /// Total canvas height measured during the last render
    pub content_height: u16,
    /// Viewport height from the last render
    pub viewport_height: u16,
    /// Catalog indices of the tiles visible in the last render
    pub visible_indices: Vec<usize>,
}

impl GridState {
    pub fn new(bottom_threshold: u16, tile_width: u16) -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            bottom_threshold,
            tile_width,
            content_height: 0,
            viewport_height: 0,
            visible_indices: Vec::new(),
        }
    }

    /// The scroll monitor check: true when the viewport bottom is within
    /// `bottom_threshold` rows of the end of the content. Also true while
    /// the content is shorter than the viewport, so pages keep loading
    /// until the screen fills.
    pub fn near_bottom(&self) -> bool {
        crossed_bottom_threshold(
            self.viewport_height,
            self.scroll_state.offset().y,
            self.content_height,
            self.bottom_threshold,
        )
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// `viewport + offset >= content - threshold`.
pub fn crossed_bottom_threshold(viewport: u16, offset: u16, content: u16, threshold: u16) -> bool {
    u32::from(viewport) + u32::from(offset) >= u32::from(content).saturating_sub(threshold.into())
}

impl EventHandler for GridState {
    type Event = (); // Grid emits no events; scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            TuiEvent::ScrollToBottom => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// The grid widget. Props are the filtered entries (catalog index + item)
/// and the per-item poster states; mutable state is the `GridState`.
pub struct PosterGrid<'a> {
    pub entries: &'a [(usize, &'a CatalogItem)],
    pub poster_states: &'a [PosterState],
    pub state: &'a mut GridState,
}

impl Component for PosterGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Reserve one column for the scrollbar.
        let content_width = area.width.saturating_sub(1);
        let tile_width = self.state.tile_width.min(content_width.max(1));
        let columns = (content_width / tile_width).max(1) as usize;
        let rows = self.entries.len().div_ceil(columns);
        let content_height = rows as u16 * TILE_HEIGHT;

        self.state.viewport_height = area.height;
        self.state.content_height = content_height;
        self.state.clamp_scroll();

        let offset_y = self.state.scroll_state.offset().y;
        let first_visible_row = (offset_y / TILE_HEIGHT) as usize;
        let last_visible_row =
            ((offset_y + area.height).div_ceil(TILE_HEIGHT) as usize).min(rows);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        self.state.visible_indices.clear();
        for row in first_visible_row..last_visible_row {
            for col in 0..columns {
                let entry_index = row * columns + col;
                let Some(&(catalog_index, item)) = self.entries.get(entry_index) else {
                    break;
                };
                self.state.visible_indices.push(catalog_index);

                let poster = self
                    .poster_states
                    .get(catalog_index)
                    .copied()
                    .unwrap_or(PosterState::Pending);
                let tile_rect = Rect::new(
                    col as u16 * tile_width,
                    row as u16 * TILE_HEIGHT,
                    tile_width,
                    TILE_HEIGHT,
                );
                scroll_view.render_widget(PosterTile { item, poster }, tile_rect);
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// One poster tile: bordered poster box + caption line.
struct PosterTile<'a> {
    item: &'a CatalogItem,
    poster: PosterState,
}

impl Widget for PosterTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 4 {
            return;
        }

        // One cell of horizontal breathing room between columns.
        let poster_area = Rect::new(
            area.x,
            area.y,
            area.width.saturating_sub(1),
            area.height - 1,
        );

        let (fill, fill_style, border_style) = match self.poster {
            PosterState::Resolved => {
                let tint = poster_tint(&self.item.poster_image);
                ('▓', Style::default().fg(tint), Style::default().fg(tint))
            }
            // Pending, in flight, or failed: the blurred placeholder.
            _ => (
                '░',
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                Style::default().add_modifier(Modifier::DIM),
            ),
        };

        let block = Block::bordered().border_style(border_style);
        let inner = block.inner(poster_area);
        block.render(poster_area, buf);

        let fill_row: String = std::iter::repeat_n(fill, inner.width as usize).collect();
        for y in inner.y..inner.y + inner.height {
            buf.set_string(inner.x, y, &fill_row, fill_style);
        }

        let caption = truncate_to_width(&self.item.name, poster_area.width as usize);
        let pad = (poster_area.width as usize).saturating_sub(caption.width()) / 2;
        buf.set_string(
            area.x + pad as u16,
            area.y + area.height - 1,
            caption,
            Style::default(),
        );
    }
}

/// Stable tint for a resolved poster, derived from its path. The terminal
/// cannot show the bitmap, so each poster at least gets a consistent color.
fn poster_tint(poster_path: &str) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Red,
    ];
    let hash: usize = poster_path.bytes().fold(0usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    });
    PALETTE[hash % PALETTE.len()]
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw + 1 > max_width {
            break;
        }
        out.push(c);
        width += cw;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_at_exact_boundary() {
        // viewport 20, offset 70, content 100, threshold 10: 90 >= 90
        assert!(crossed_bottom_threshold(20, 70, 100, 10));
        // One row short: 89 < 90
        assert!(!crossed_bottom_threshold(20, 69, 100, 10));
    }

    #[test]
    fn test_threshold_when_content_fits_viewport() {
        // Content shorter than the viewport always reads as near-bottom,
        // so pagination continues until the screen fills.
        assert!(crossed_bottom_threshold(40, 0, 18, 10));
        assert!(crossed_bottom_threshold(40, 0, 0, 10));
    }

    #[test]
    fn test_near_bottom_uses_render_measurements() {
        let mut state = GridState::new(10, 22);
        state.viewport_height = 30;
        state.content_height = 200;
        assert!(!state.near_bottom());

        state.content_height = 35;
        assert!(state.near_bottom());
    }

    #[test]
    fn test_scroll_events_move_offset() {
        let mut state = GridState::new(10, 22);
        state.content_height = 100;
        state.viewport_height = 20;
        assert_eq!(state.scroll_state.offset().y, 0);
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 1);
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll_state.offset().y, 0);
        // Scrolling above the top saturates.
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut state = GridState::new(10, 22);
        state.content_height = 50;
        state.viewport_height = 20;
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 500 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 30);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("A Very Long Movie Title", 10), "A Very Lo…");
        assert_eq!(truncate_to_width("Exact", 5), "Exact");
    }

    #[test]
    fn test_poster_tint_is_stable() {
        assert_eq!(poster_tint("poster1.jpg"), poster_tint("poster1.jpg"));
    }
}
