//! Application state and transitions.
//!
//! AppState is the root UI state: everything the screen shows except the
//! result list itself, which belongs to the search engine.

use crate::model::{Cart, FetchFailure, FilterSet, OrderReceipt, OrderRequest, Product};
use crate::state::{FilterEditor, ResultList, SearchBuffer};

// ===== Panels and status =====

/// Overlay panel currently open on top of the result list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    /// Only the result list.
    #[default]
    None,
    /// Filter panel with its draft.
    Filters(FilterEditor),
    /// Cart panel.
    Cart,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Confirmation or hint.
    Info,
    /// Something the user asked for did not happen.
    Error,
}

/// One-line message in the status bar, replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Message text.
    pub text: String,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search bar contents.
    pub search: SearchBuffer,
    /// Selection within the engine's result list.
    pub results: ResultList,
    /// Open overlay.
    pub panel: Panel,
    /// Local cart.
    pub cart: Cart,
    /// Selected line in the cart panel.
    pub cart_selection: usize,
    /// Filter picker options, loaded once at startup.
    pub categories: Vec<String>,
    /// Subcategory picker options.
    pub subcategories: Vec<String>,
    /// Latest status message.
    pub status: Option<StatusMessage>,
    /// True between submitting an order and hearing back.
    pub order_in_flight: bool,
    /// Rows the result list had on the last draw.
    pub list_viewport: usize,
}

impl AppState {
    /// Fresh state with `initial_term` in the search bar.
    pub fn new(initial_term: &str) -> Self {
        Self {
            search: SearchBuffer::new(initial_term),
            results: ResultList::default(),
            panel: Panel::None,
            cart: Cart::new(),
            cart_selection: 0,
            categories: Vec::new(),
            subcategories: Vec::new(),
            status: None,
            order_in_flight: false,
            list_viewport: 1,
        }
    }

    /// Show an info message.
    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        });
    }

    /// Show an error message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        });
    }

    /// Drop the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Store picker options. A failed list leaves that picker with "All" only.
    pub fn set_taxonomy(
        &mut self,
        categories: Result<Vec<String>, FetchFailure>,
        subcategories: Result<Vec<String>, FetchFailure>,
    ) {
        self.categories = categories.unwrap_or_default();
        self.subcategories = subcategories.unwrap_or_default();
    }

    // ===== Panels =====

    /// Open the filter panel on the filters in effect.
    pub fn open_filters(&mut self, current: &FilterSet) {
        self.panel = Panel::Filters(FilterEditor::open(
            current,
            &self.categories,
            &self.subcategories,
        ));
    }

    /// Open the cart panel, or close it if open.
    pub fn toggle_cart(&mut self) {
        self.panel = match self.panel {
            Panel::Cart => Panel::None,
            _ => Panel::Cart,
        };
        self.cart_selection = self
            .cart_selection
            .min(self.cart.lines().len().saturating_sub(1));
    }

    /// Close the open panel. Returns false when none was open.
    pub fn close_panel(&mut self) -> bool {
        let was_open = self.panel != Panel::None;
        self.panel = Panel::None;
        was_open
    }

    // ===== Cart =====

    /// Add the selected product (if any) and report it in the status bar.
    pub fn add_selected_to_cart(&mut self, items: &[Product]) -> bool {
        let Some(product) = self
            .results
            .selected_in(items.len())
            .and_then(|i| items.get(i))
        else {
            return false;
        };
        self.cart.add(product);
        self.set_info(format!(
            "Added {} to cart ({} items)",
            product.name,
            self.cart.item_count()
        ));
        true
    }

    /// Select the previous cart line.
    pub fn cart_select_up(&mut self) {
        self.cart_selection = self.cart_selection.saturating_sub(1);
    }

    /// Select the next cart line.
    pub fn cart_select_down(&mut self) {
        let last = self.cart.lines().len().saturating_sub(1);
        self.cart_selection = (self.cart_selection + 1).min(last);
    }

    /// Change the selected line's quantity by `delta`, never below one.
    pub fn adjust_cart_quantity(&mut self, delta: i64) -> bool {
        let Some(line) = self.cart.lines().get(self.cart_selection) else {
            return false;
        };
        let quantity = (i64::from(line.quantity) + delta).clamp(1, i64::from(u32::MAX)) as u32;
        let id = line.product_id.clone();
        self.cart.set_quantity(&id, quantity)
    }

    /// Remove the selected cart line.
    pub fn remove_cart_selection(&mut self) -> bool {
        let Some(id) = self
            .cart
            .lines()
            .get(self.cart_selection)
            .map(|l| l.product_id.clone())
        else {
            return false;
        };
        let removed = self.cart.remove(&id);
        self.cart_selection = self
            .cart_selection
            .min(self.cart.lines().len().saturating_sub(1));
        removed
    }

    /// Build the order to submit, or explain in the status bar why not.
    pub fn begin_order(&mut self, shipping_address_id: Option<&str>) -> Option<OrderRequest> {
        if self.order_in_flight {
            self.set_info("An order is already being placed");
            return None;
        }
        match self.cart.to_order(shipping_address_id) {
            Ok(order) => {
                self.order_in_flight = true;
                self.set_info("Placing order...");
                Some(order)
            }
            Err(e) => {
                self.set_error(e.to_string());
                None
            }
        }
    }

    /// Record the service's answer to a submitted order.
    pub fn finish_order(&mut self, result: Result<OrderReceipt, FetchFailure>) {
        self.order_in_flight = false;
        match result {
            Ok(receipt) => {
                self.cart.clear();
                self.cart_selection = 0;
                match receipt.order_id {
                    Some(id) => self.set_info(format!("Order {id} placed")),
                    None => self.set_info("Order placed"),
                }
            }
            Err(failure) => self.set_error(format!("Order failed: {}", failure.reason)),
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
