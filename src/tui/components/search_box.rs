//! # SearchBox Component
//!
//! Single-line text input that filters the catalog as you type.
//!
//! ## Responsibilities
//!
//! - Capture text input (chars, backspace)
//! - Emit `TermChanged` with the full new term on every edit
//! - Show focus: bright bordered box with a cursor marker when focused,
//!   dimmed when not (the `/` key moves focus here)
//!
//! There is deliberately no debounce: the filter is cheap and recomputed
//! per frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The term changed; carries the complete new value.
    TermChanged(String),
}

pub struct SearchBox {
    /// Current search term (Internal State; mirrored into App via actions)
    pub buffer: String,
    /// Whether keystrokes are routed here (Prop, set by the event loop)
    pub focused: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: false,
        }
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::TermChanged(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
                Some(SearchEvent::TermChanged(self.buffer.clone()))
            }
            _ => None,
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        // Keep the tail visible when the term outgrows the box.
        let inner_width = area.width.saturating_sub(3) as usize;
        let mut visible: &str = &self.buffer;
        while visible.width() > inner_width {
            let mut chars = visible.chars();
            chars.next();
            visible = chars.as_str();
        }

        let text = if self.focused {
            format!("{visible}█")
        } else {
            visible.to_string()
        };

        let paragraph = Paragraph::new(text).block(
            Block::bordered()
                .title("Search (/)")
                .border_style(border_style)
                .title_style(border_style),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_accumulate_and_emit_full_term() {
        let mut search = SearchBox::new();
        assert_eq!(
            search.handle_event(&TuiEvent::InputChar('r')),
            Some(SearchEvent::TermChanged("r".to_string()))
        );
        assert_eq!(
            search.handle_event(&TuiEvent::InputChar('o')),
            Some(SearchEvent::TermChanged("ro".to_string()))
        );
        assert_eq!(search.buffer, "ro");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut search = SearchBox::new();
        search.handle_event(&TuiEvent::InputChar('a'));
        search.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(
            search.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::TermChanged("a".to_string()))
        );
    }

    #[test]
    fn test_backspace_on_empty_buffer_emits_nothing() {
        let mut search = SearchBox::new();
        assert_eq!(search.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_scroll_events_ignored() {
        let mut search = SearchBox::new();
        assert_eq!(search.handle_event(&TuiEvent::ScrollDown), None);
        assert!(search.buffer.is_empty());
    }
}
