//! Product list widget.

use crate::engine::{DisplayState, Phase};
use crate::state::ResultList;
use crate::view::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Rows available for products inside a list area of the given height.
pub fn viewport_rows(area_height: u16) -> usize {
    usize::from(area_height.saturating_sub(2)).max(1)
}

/// One row per loaded product, plus a loading row while a fetch is in flight.
pub struct ProductList<'a> {
    display: &'a DisplayState,
    list: ResultList,
    phase: Phase,
    theme: &'a Theme,
}

impl<'a> ProductList<'a> {
    /// List widget over `display`, scrolled and selected per `list`.
    pub fn new(display: &'a DisplayState, list: ResultList, phase: Phase, theme: &'a Theme) -> Self {
        Self {
            display,
            list,
            phase,
            theme,
        }
    }

    fn title(&self) -> String {
        if self.display.is_refreshing {
            " Products (refreshing) ".to_string()
        } else {
            " Products ".to_string()
        }
    }

    /// Placeholder shown instead of rows, if any.
    fn placeholder(&self) -> Option<Line<'static>> {
        if !self.display.items.is_empty() {
            return None;
        }
        if self.display.is_loading || self.phase == Phase::Debouncing {
            return Some(Line::from(Span::styled("Loading...", self.theme.muted)));
        }
        if self.phase == Phase::Idle && !self.display.query.term().is_empty() {
            return Some(Line::from(Span::styled(
                "No products found",
                self.theme.muted,
            )));
        }
        None
    }

    fn product_line(&self, index: usize, width: usize) -> Line<'a> {
        let product = &self.display.items[index];
        let price = product.price_label();
        let classification = product.classification();
        let left_width = product.name.width() + 2 + classification.width();
        let padding = width.saturating_sub(left_width + price.width()).max(1);

        let line = Line::from(vec![
            Span::styled(product.name.clone(), self.theme.product_name),
            Span::raw("  "),
            Span::styled(classification, self.theme.classification),
            Span::raw(" ".repeat(padding)),
            Span::styled(price, self.theme.price),
        ]);
        if self.list.selected_in(self.display.items.len()) == Some(index) {
            line.style(self.theme.selected)
        } else {
            line.style(Style::default())
        }
    }
}

impl Widget for ProductList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(self.title(), self.theme.title));
        let rows = viewport_rows(area.height);
        let width = usize::from(area.width.saturating_sub(2));

        let lines: Vec<Line> = match self.placeholder() {
            Some(line) => vec![line],
            None => {
                let len = self.display.items.len();
                let start = self.list.offset().min(len);
                let end = (start + rows).min(len);
                let mut lines: Vec<Line> =
                    (start..end).map(|i| self.product_line(i, width)).collect();
                if self.phase == Phase::LoadingMore && lines.len() < rows {
                    lines.push(Line::from(Span::styled(
                        "Loading more...",
                        self.theme.muted,
                    )));
                }
                lines
            }
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
