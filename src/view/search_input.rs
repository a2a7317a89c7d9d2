//! Search input widget for rendering the search bar.

use crate::model::SortKey;
use crate::state::SearchBuffer;
use crate::view::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar with an inline cursor. The title shows the active sort.
pub struct SearchInput<'a> {
    buffer: &'a SearchBuffer,
    sort: SortKey,
    theme: &'a Theme,
    /// Draw the cursor (false while a panel has focus).
    focused: bool,
}

impl<'a> SearchInput<'a> {
    /// Search box showing `buffer` with `sort` in the title.
    pub fn new(buffer: &'a SearchBuffer, sort: SortKey, theme: &'a Theme) -> Self {
        Self {
            buffer,
            sort,
            theme,
            focused: true,
        }
    }

    /// Whether the search box has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.buffer.text();
        let cursor = self.buffer.cursor();

        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = rest.collect();

        let line = if self.focused {
            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char, self.theme.cursor),
                Span::raw(after),
            ])
        } else if text.is_empty() {
            Line::from(Span::styled("Search products...", self.theme.muted))
        } else {
            Line::from(text)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(" Search ", self.theme.title))
            .title_top(Line::from(format!(" Sort: {} ", self.sort.label())).right_aligned());

        Paragraph::new(line).block(block).render(area, buf);
    }
}
