//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod cart;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod product;
pub mod query;

// Re-export for convenience
pub use cart::{Cart, CartError, CartLine, OrderItem, OrderReceipt, OrderRequest};
pub use error::{AppError, FailureKind, FetchFailure};
pub use identifiers::{InvalidProductId, ProductId};
pub use key_action::KeyAction;
pub use product::{CatalogItem, Product, ResultPage, SearchResponse};
pub use query::{FilterPatch, FilterSet, Lineage, QueryState, SortKey, UnknownSortKey};
