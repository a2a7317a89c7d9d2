//! Colour configuration and the styles used across widgets.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colours on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colours off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Theme =====

/// Styles for every element on screen.
///
/// With colours disabled only modifiers (bold, reversed) remain, so the
/// selection and cursor stay visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Block borders.
    pub border: Style,
    /// Block titles and labels.
    pub title: Style,
    /// Search cursor.
    pub cursor: Style,
    /// Selected product row.
    pub selected: Style,
    /// Product names.
    pub product_name: Style,
    /// Category and subcategory.
    pub classification: Style,
    /// Prices.
    pub price: Style,
    /// Placeholders and hints.
    pub muted: Style,
    /// Filter chips.
    pub chip: Style,
    /// Info messages.
    pub info: Style,
    /// Errors and failures.
    pub error: Style,
    /// Focused field label in the filter panel.
    pub focused_field: Style,
}

impl Theme {
    /// Theme for the given colour setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                border: Style::default().fg(Color::DarkGray),
                title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().bg(Color::Blue).fg(Color::White),
                product_name: Style::default().add_modifier(Modifier::BOLD),
                classification: Style::default().fg(Color::Gray),
                price: Style::default().fg(Color::Green),
                muted: Style::default().fg(Color::DarkGray),
                chip: Style::default().fg(Color::Black).bg(Color::Cyan),
                info: Style::default().fg(Color::Cyan),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                focused_field: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            }
        } else {
            let reversed = Style::default().add_modifier(Modifier::REVERSED);
            let bold = Style::default().add_modifier(Modifier::BOLD);
            Self {
                border: Style::default(),
                title: bold,
                cursor: reversed,
                selected: reversed,
                product_name: bold,
                classification: Style::default(),
                price: Style::default(),
                muted: Style::default(),
                chip: reversed,
                info: Style::default(),
                error: bold,
                focused_field: bold,
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::enabled())
    }
}

// ===== Tests =====
