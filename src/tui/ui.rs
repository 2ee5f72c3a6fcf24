use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::filter::{FilterOutcome, filter_items};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::PosterGrid;

const SEARCH_BOX_WIDTH: u16 = 32;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(3), Min(0), Length(1)]);
    let [header_area, body_area, status_area] = layout.areas(frame.area());

    draw_header(frame, header_area, app, tui);

    // The filtered view is derived fresh every frame, never cached.
    match filter_items(&app.items, &app.search_term) {
        FilterOutcome::Matches(entries) => {
            let mut grid = PosterGrid {
                entries: &entries,
                poster_states: &app.poster_states,
                state: &mut tui.grid,
            };
            grid.render(frame, body_area);
        }
        FilterOutcome::NoMatch => {
            draw_empty_body(frame, body_area, tui, "No Match Found...!");
        }
        FilterOutcome::NoData => {
            // No items yet: the no-match message is suppressed.
            let text = if app.is_loading { "Loading catalog..." } else { "" };
            draw_empty_body(frame, body_area, tui, text);
        }
    }

    draw_status_line(frame, status_area, app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, search_area] =
        Layout::horizontal([Min(0), Length(SEARCH_BOX_WIDTH)]).areas(area);

    // Back glyph + catalog title, on the search box's middle row.
    let title_line = Line::from(vec![
        Span::raw("← "),
        Span::styled(
            app.catalog_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let title_row = Rect::new(
        title_area.x + 1,
        title_area.y + title_area.height / 2,
        title_area.width.saturating_sub(1),
        1,
    );
    frame.render_widget(Paragraph::new(title_line), title_row);

    tui.search_box.render(frame, search_area);
}

/// Body without a grid: centered message (possibly empty). The grid's
/// measurements are zeroed so the scroll monitor sees an empty document;
/// scrolling here still counts as "near the bottom".
fn draw_empty_body(frame: &mut Frame, area: Rect, tui: &mut TuiState, message: &str) {
    tui.grid.content_height = 0;
    tui.grid.viewport_height = area.height;
    tui.grid.visible_indices.clear();

    if message.is_empty() {
        return;
    }
    let vertical_pad = area.height / 2;
    let paragraph = Paragraph::new(format!("{}{}", "\n".repeat(vertical_pad as usize), message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit · "),
        Span::styled("/", Style::default().fg(Color::Cyan)),
        Span::raw(" search · "),
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::raw(" scroll"),
    ];
    if !app.status_message.is_empty() {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            app.status_message.clone(),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    if app.is_loading {
        spans.push(Span::styled(
            format!("  ·  fetching page {}...", app.current_page),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Line::from(spans), area);
}
