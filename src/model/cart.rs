//! Local shopping cart and the order payload built from it.

use crate::model::{Product, ProductId};
use serde::Serialize;
use thiserror::Error;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product in this line.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Price per unit at the time it was added.
    pub unit_price: f64,
    /// Units, at least one.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// In-memory cart. Lines keep the order products were first added in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Why an order could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Nothing to order.
    #[error("Cart is empty")]
    Empty,
    /// Orders need a shipping address id.
    #[error("No shipping address configured (set shipping_address_id)")]
    MissingAddress,
}

impl Cart {
    /// Empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .fold(0.0, |acc, line| acc + line.line_total())
    }

    /// Add one unit of `product`, creating the line if needed.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        });
    }

    /// Set a line's quantity. Quantities below one are ignored; use `remove`.
    ///
    /// Returns true if the cart changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.lines.iter_mut().find(|l| &l.product_id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove a line entirely. Returns true if it existed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Build the order payload for `POST /order/create`.
    pub fn to_order(&self, shipping_address_id: Option<&str>) -> Result<OrderRequest, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        let address = shipping_address_id
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(CartError::MissingAddress)?;

        Ok(OrderRequest {
            cart_items: self
                .lines
                .iter()
                .map(|l| OrderItem {
                    product: l.product_id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            shipping_address_id: address.to_string(),
            total_amount: self.total(),
        })
    }
}

/// Order creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// `cartItems`
    pub cart_items: Vec<OrderItem>,
    /// `shippingAddressId`
    pub shipping_address_id: String,
    /// `totalAmount`
    pub total_amount: f64,
}

/// One entry of `cartItems`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    /// Product id.
    pub product: ProductId,
    /// Units ordered.
    pub quantity: u32,
}

/// What the service told us about a created order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Id of the created order, when the service returns one.
    pub order_id: Option<String>,
}
