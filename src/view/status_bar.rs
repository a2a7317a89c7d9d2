//! One-line bars: active filter chips and the status bar.

use crate::engine::{DisplayState, Phase};
use crate::model::{Cart, FetchFailure, FilterSet};
use crate::state::{StatusLevel, StatusMessage};
use crate::view::Theme;
use ratatui::text::{Line, Span};

/// Short label for the engine phase.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Ready",
        Phase::Debouncing => "Typing...",
        Phase::Fetching => "Searching...",
        Phase::LoadingMore => "Loading more...",
        Phase::Failed(_) => "Failed",
    }
}

fn price_bound(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| v.to_string())
}

/// Chip texts for the active filters, in display order.
pub fn filter_chips(filters: &FilterSet) -> Vec<String> {
    let mut chips = Vec::new();
    if let Some(category) = &filters.category {
        chips.push(format!("Category: {category}"));
    }
    if let Some(subcategory) = &filters.subcategory {
        chips.push(format!("Subcategory: {subcategory}"));
    }
    if filters.min_price.is_some() || filters.max_price.is_some() {
        chips.push(format!(
            "Price: ${} - ${}",
            price_bound(filters.min_price, "0"),
            price_bound(filters.max_price, "∞")
        ));
    }
    chips
}

/// The filter chips row.
pub fn filter_chips_line(filters: &FilterSet, theme: &Theme) -> Line<'static> {
    let chips = filter_chips(filters);
    if chips.is_empty() {
        return Line::from(Span::styled(" No filters (F2 to add)", theme.muted));
    }
    let mut spans = vec![Span::raw(" ")];
    for chip in chips {
        spans.push(Span::styled(format!(" {chip} "), theme.chip));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Everything the status bar shows.
pub struct StatusBar<'a> {
    /// Engine phase.
    pub phase: Phase,
    /// Current list.
    pub display: &'a DisplayState,
    /// Cart to summarise.
    pub cart: &'a Cart,
    /// Last message from the app.
    pub message: Option<&'a StatusMessage>,
    /// Last surfaced fetch failure.
    pub failure: Option<&'a FetchFailure>,
}

impl StatusBar<'_> {
    /// "Page current/total"
    pub fn page_label(&self) -> String {
        format!(
            "Page {}/{}",
            self.display.current_page, self.display.total_pages
        )
    }

    /// Item count and total of the cart.
    pub fn cart_label(&self) -> String {
        format!(
            "Cart: {} items (${:.2})",
            self.cart.item_count(),
            self.cart.total()
        )
    }

    /// Errors from the app win over fetch failures, which win over info.
    fn message_span(&self, theme: &Theme) -> Option<Span<'static>> {
        match (self.message, self.failure) {
            (Some(m), _) if m.level == StatusLevel::Error => {
                Some(Span::styled(m.text.clone(), theme.error))
            }
            (_, Some(f)) if !f.user_message().is_empty() => {
                Some(Span::styled(f.user_message(), theme.error))
            }
            (Some(m), _) => Some(Span::styled(m.text.clone(), theme.info)),
            _ => None,
        }
    }

    /// The rendered status line.
    pub fn line(&self, theme: &Theme) -> Line<'static> {
        let separator = || Span::styled(" | ", theme.muted);
        let mut spans = vec![
            Span::styled(format!(" {}", phase_label(self.phase)), theme.title),
            separator(),
            Span::raw(self.page_label()),
            separator(),
            Span::raw(format!("{} products", self.display.total_count)),
            separator(),
            Span::raw(self.cart_label()),
        ];
        if let Some(message) = self.message_span(theme) {
            spans.push(separator());
            spans.push(message);
        }
        Line::from(spans)
    }
}
