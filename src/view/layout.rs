//! Screen layout.
//!
//! Search bar on top, filter chips under it, product list filling the
//! middle and the status bar on the last line. Panels overlay the list.

use crate::engine::SearchEngine;
use crate::state::{AppState, Panel};
use crate::view::{
    panels, status_bar, ProductList, SearchInput, StatusBar, Theme,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search box.
    pub search: Rect,
    /// Active filter chips.
    pub chips: Rect,
    /// Product list.
    pub list: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the terminal into the main screen areas.
pub fn calculate_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar (bordered)
            Constraint::Length(1), // Filter chips
            Constraint::Min(0),    // Product list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenAreas {
        search: chunks[0],
        chips: chunks[1],
        list: chunks[2],
        status: chunks[3],
    }
}

/// Draw the whole screen, including any open panel.
pub fn render_layout(frame: &mut Frame, state: &AppState, engine: &SearchEngine, theme: &Theme) {
    let areas = calculate_areas(frame.area());
    let display = engine.display();

    let search = SearchInput::new(&state.search, engine.query().sort(), theme)
        .focused(state.panel == Panel::None);
    frame.render_widget(search, areas.search);

    let chips = status_bar::filter_chips_line(engine.query().filters(), theme);
    frame.render_widget(Paragraph::new(chips), areas.chips);

    let list = ProductList::new(display, state.results, engine.phase(), theme);
    frame.render_widget(list, areas.list);

    let status = StatusBar {
        phase: engine.phase(),
        display,
        cart: &state.cart,
        message: state.status.as_ref(),
        failure: engine.last_failure(),
    };
    frame.render_widget(Paragraph::new(status.line(theme)), areas.status);

    match &state.panel {
        Panel::None => {}
        Panel::Filters(editor) => panels::render_filter_panel(frame, editor, theme),
        Panel::Cart => panels::render_cart_panel(frame, &state.cart, state.cart_selection, theme),
    }
}
