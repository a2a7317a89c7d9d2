//! Core identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identity of a product (the remote `_id`).
///
/// This is the identity the result accumulator de-duplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Smart constructor: validates non-empty, non-blank id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidProductId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(InvalidProductId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = InvalidProductId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Rejected product id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidProductId {
    /// Blank or empty id.
    #[error("Product ID cannot be empty")]
    Empty,
}

// ===== Tests =====
