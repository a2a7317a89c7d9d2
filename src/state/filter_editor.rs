//! Filter panel editing (pure state transitions).
//!
//! The panel edits a draft; nothing reaches the engine until the draft is
//! turned into a single [`FilterPatch`] with [`FilterEditor::to_patch`].

use crate::model::{FilterPatch, FilterSet};
use thiserror::Error;

/// Field with keyboard focus inside the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    /// Category picker.
    #[default]
    Category,
    /// Subcategory picker.
    Subcategory,
    /// Minimum price input.
    MinPrice,
    /// Maximum price input.
    MaxPrice,
}

impl FilterField {
    const ORDER: [FilterField; 4] = [
        FilterField::Category,
        FilterField::Subcategory,
        FilterField::MinPrice,
        FilterField::MaxPrice,
    ];

    /// Following field, wrapping.
    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    /// Preceding field, wrapping.
    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Label shown in the panel.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Category => "Category",
            FilterField::Subcategory => "Subcategory",
            FilterField::MinPrice => "Min price",
            FilterField::MaxPrice => "Max price",
        }
    }
}

/// Draft values could not be turned into filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterInputError {
    /// A price field holds something other than a number.
    #[error("{field} must be a non-negative number, got '{value}'")]
    InvalidPrice {
        /// Label of the offending field.
        field: &'static str,
        /// Text the user typed.
        value: String,
    },
}

/// Draft state of the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEditor {
    focus: FilterField,
    /// Picker options; index 0 of the picker is always "All".
    categories: Vec<String>,
    subcategories: Vec<String>,
    /// 0 = All, `n` = `categories[n - 1]`.
    category_choice: usize,
    subcategory_choice: usize,
    min_price: String,
    max_price: String,
}

impl FilterEditor {
    /// Open the editor on the filters currently in effect.
    ///
    /// An active category missing from the remote list is kept as an extra
    /// option so opening and applying the panel never drops it.
    pub fn open(current: &FilterSet, categories: &[String], subcategories: &[String]) -> Self {
        let (categories, category_choice) = with_choice(categories, current.category.as_deref());
        let (subcategories, subcategory_choice) =
            with_choice(subcategories, current.subcategory.as_deref());
        Self {
            focus: FilterField::Category,
            categories,
            subcategories,
            category_choice,
            subcategory_choice,
            min_price: current.min_price.map(format_price).unwrap_or_default(),
            max_price: current.max_price.map(format_price).unwrap_or_default(),
        }
    }

    /// Field with focus.
    pub fn focus(&self) -> FilterField {
        self.focus
    }

    /// Chosen category, or "All".
    pub fn category_label(&self) -> &str {
        choice_label(&self.categories, self.category_choice)
    }

    /// Chosen subcategory, or "All".
    pub fn subcategory_label(&self) -> &str {
        choice_label(&self.subcategories, self.subcategory_choice)
    }

    /// Minimum price as typed.
    pub fn min_price_text(&self) -> &str {
        &self.min_price
    }

    /// Maximum price as typed.
    pub fn max_price_text(&self) -> &str {
        &self.max_price
    }

    /// Build the patch to apply, replacing every filter field at once.
    pub fn to_patch(&self) -> Result<FilterPatch, FilterInputError> {
        let min = parse_price("Min price", &self.min_price)?;
        let max = parse_price("Max price", &self.max_price)?;
        Ok(FilterPatch {
            category: Some(choice_value(&self.categories, self.category_choice)),
            subcategory: Some(choice_value(&self.subcategories, self.subcategory_choice)),
            min_price: Some(min),
            max_price: Some(max),
        })
    }
}

fn with_choice(options: &[String], current: Option<&str>) -> (Vec<String>, usize) {
    let mut options = options.to_vec();
    let choice = match current {
        None => 0,
        Some(name) => match options.iter().position(|o| o == name) {
            Some(i) => i + 1,
            None => {
                options.push(name.to_string());
                options.len()
            }
        },
    };
    (options, choice)
}

fn choice_label(options: &[String], choice: usize) -> &str {
    match choice {
        0 => "All",
        n => options.get(n - 1).map(String::as_str).unwrap_or("All"),
    }
}

fn choice_value(options: &[String], choice: usize) -> Option<String> {
    match choice {
        0 => None,
        n => options.get(n - 1).cloned(),
    }
}

fn format_price(value: f64) -> String {
    value.to_string()
}

fn parse_price(field: &'static str, text: &str) -> Result<Option<f64>, FilterInputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(FilterInputError::InvalidPrice {
            field,
            value: trimmed.to_string(),
        }),
    }
}

// ===== Transitions =====

/// Focus the next field.
pub fn next_field(mut editor: FilterEditor) -> FilterEditor {
    editor.focus = editor.focus.next();
    editor
}

/// Focus the previous field.
pub fn prev_field(mut editor: FilterEditor) -> FilterEditor {
    editor.focus = editor.focus.prev();
    editor
}

/// Step the focused picker by `delta`, wrapping through "All".
/// No-op on price fields.
pub fn cycle_option(mut editor: FilterEditor, delta: isize) -> FilterEditor {
    let (len, choice) = match editor.focus {
        FilterField::Category => (editor.categories.len(), &mut editor.category_choice),
        FilterField::Subcategory => (editor.subcategories.len(), &mut editor.subcategory_choice),
        FilterField::MinPrice | FilterField::MaxPrice => return editor,
    };
    let slots = (len + 1) as isize;
    *choice = (*choice as isize + delta).rem_euclid(slots) as usize;
    editor
}

/// Type into the focused price field. Only digits and one decimal point are
/// accepted; pickers ignore typing.
pub fn input_char(mut editor: FilterEditor, ch: char) -> FilterEditor {
    let field = match editor.focus {
        FilterField::MinPrice => &mut editor.min_price,
        FilterField::MaxPrice => &mut editor.max_price,
        _ => return editor,
    };
    if ch.is_ascii_digit() || (ch == '.' && !field.contains('.')) {
        field.push(ch);
    }
    editor
}

/// Delete the last typed price character, or reset the focused picker to "All".
pub fn backspace(mut editor: FilterEditor) -> FilterEditor {
    match editor.focus {
        FilterField::MinPrice => {
            editor.min_price.pop();
        }
        FilterField::MaxPrice => {
            editor.max_price.pop();
        }
        FilterField::Category => editor.category_choice = 0,
        FilterField::Subcategory => editor.subcategory_choice = 0,
    }
    editor
}
