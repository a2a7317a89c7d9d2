//! Overlay panels: filter editor and cart.
//!
//! Both render centered on top of the result list and clear the area
//! underneath first.

use crate::model::Cart;
use crate::state::{FilterEditor, FilterField};
use crate::view::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PANEL_WIDTH_PERCENT: u16 = 60;
const PANEL_HEIGHT_PERCENT: u16 = 60;

/// Centered rect taking the given percentage of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn hint_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text, theme.muted))
}

// ===== Filter panel =====

fn field_line(editor: &FilterEditor, field: FilterField, theme: &Theme) -> Line<'static> {
    let value = match field {
        FilterField::Category => format!("< {} >", editor.category_label()),
        FilterField::Subcategory => format!("< {} >", editor.subcategory_label()),
        FilterField::MinPrice => format!("{}_", editor.min_price_text()),
        FilterField::MaxPrice => format!("{}_", editor.max_price_text()),
    };
    let focused = editor.focus() == field;
    let marker = if focused { "> " } else { "  " };
    let label = format!("{marker}{:<12}", field.label());
    let label_style = if focused { theme.focused_field } else { theme.title };
    Line::from(vec![
        Span::styled(label, label_style),
        Span::raw(value),
    ])
}

/// Lines of the filter panel body.
pub fn filter_panel_lines(editor: &FilterEditor, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = [
        FilterField::Category,
        FilterField::Subcategory,
        FilterField::MinPrice,
        FilterField::MaxPrice,
    ]
    .into_iter()
    .map(|field| field_line(editor, field, theme))
    .collect();
    lines.push(Line::default());
    lines.push(hint_line(
        "Tab/↑↓ field  ←→ choose  Enter apply  Esc cancel",
        theme,
    ));
    lines
}

/// Draw the filter panel over the centre of the screen.
pub fn render_filter_panel(frame: &mut Frame, editor: &FilterEditor, theme: &Theme) {
    let area = centered_rect(PANEL_WIDTH_PERCENT, PANEL_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, area);

    let panel = Paragraph::new(filter_panel_lines(editor, theme)).block(
        Block::default()
            .title(Span::styled(" Filters ", theme.title))
            .borders(Borders::ALL)
            .border_style(theme.border),
    );
    frame.render_widget(panel, area);
}

// ===== Cart panel =====

/// Lines of the cart panel body, `width` columns wide.
pub fn cart_panel_lines(cart: &Cart, selection: usize, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    if cart.is_empty() {
        return vec![
            Line::from(Span::styled("Cart is empty", theme.muted)),
            Line::default(),
            hint_line("Enter on a product adds it  Esc close", theme),
        ];
    }

    let mut lines: Vec<Line> = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let left = format!("{} x{}", line.name, line.quantity);
            let right = format!("${:.2}", line.line_total());
            let padding = width.saturating_sub(left.width() + right.width()).max(1);
            let text = Line::from(vec![
                Span::styled(left, theme.product_name),
                Span::raw(" ".repeat(padding)),
                Span::styled(right, theme.price),
            ]);
            if i == selection {
                text.style(theme.selected)
            } else {
                text
            }
        })
        .collect();

    lines.push(Line::default());
    lines.push(
        Line::from(vec![
            Span::styled("Total: ", theme.title),
            Span::styled(format!("${:.2}", cart.total()), theme.price),
        ])
        .alignment(Alignment::Right),
    );
    lines.push(hint_line(
        "+/- quantity  Ctrl+x remove  Ctrl+o order  Esc close",
        theme,
    ));
    lines
}

/// Draw the cart panel over the centre of the screen.
pub fn render_cart_panel(frame: &mut Frame, cart: &Cart, selection: usize, theme: &Theme) {
    let area = centered_rect(PANEL_WIDTH_PERCENT, PANEL_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, area);

    let width = usize::from(area.width.saturating_sub(2));
    let title = format!(" Cart ({} items) ", cart.item_count());
    let panel = Paragraph::new(cart_panel_lines(cart, selection, width, theme)).block(
        Block::default()
            .title(Span::styled(title, theme.title))
            .borders(Borders::ALL)
            .border_style(theme.border),
    );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterSet;
    use crate::state::filter_editor::next_field;
    use crate::test_harness::product;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn centered_rect_is_centered() {
        let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn filter_panel_marks_focused_field() {
        let editor = FilterEditor::open(&FilterSet::default(), &["Footwear".to_string()], &[]);
        let editor = next_field(editor);
        let lines = filter_panel_lines(&editor, &Theme::default());
        let text = text(&lines);
        assert!(text.contains("< All >"));
        let focused = text
            .lines()
            .find(|l| l.starts_with("> "))
            .expect("one focused field");
        assert!(focused.contains(FilterField::Subcategory.label()));
    }

    #[test]
    fn cart_panel_lists_lines_and_total() {
        let mut cart = Cart::new();
        cart.add(&product("a"));
        cart.add(&product("a"));
        cart.add(&product("b"));
        let text = text(&cart_panel_lines(&cart, 0, 40, &Theme::default()));
        assert!(text.contains("Product a x2"));
        assert!(text.contains("$20.00"));
        assert!(text.contains("Product b x1"));
        assert!(text.contains("Total: $30.00"));
    }

    #[test]
    fn empty_cart_says_so() {
        let text = text(&cart_panel_lines(&Cart::new(), 0, 40, &Theme::default()));
        assert!(text.contains("Cart is empty"));
    }
}
