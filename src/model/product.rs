//! Catalog items and result pages.
//!
//! The engine only needs an item's identity; `CatalogItem` is that seam.
//! `Product` is the concrete item the remote service returns, and the
//! `*Response` types mirror its JSON envelopes.

use crate::model::ProductId;
use serde::Deserialize;
use std::hash::Hash;

// ===== CatalogItem =====

/// An item the result accumulator can merge.
pub trait CatalogItem {
    /// Identity key, unique within one result list.
    type Key: Eq + Hash + Clone;

    /// Identity used for de-duplication across pages.
    fn key(&self) -> &Self::Key;
}

// ===== Product =====

/// A product as listed by the catalog service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Catalog id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description; empty when the service omits it.
    #[serde(default)]
    pub description: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Category name, if classified.
    #[serde(default, deserialize_with = "named_ref")]
    pub category: Option<String>,
    /// Subcategory name, if classified.
    #[serde(default, deserialize_with = "named_ref")]
    pub subcategory: Option<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Brand, if known.
    #[serde(default)]
    pub brand: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogItem for Product {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

impl Product {
    /// "category • subcategory", skipping whichever is missing.
    pub fn classification(&self) -> String {
        match (&self.category, &self.subcategory) {
            (Some(c), Some(s)) => format!("{c} • {s}"),
            (Some(c), None) => c.clone(),
            (None, Some(s)) => s.clone(),
            (None, None) => String::new(),
        }
    }

    /// Price with two decimals and a dollar sign.
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Category and subcategory arrive as `{ "name": ... }` objects, or null.
fn named_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    Ok(Option::<Named>::deserialize(deserializer)?.map(|n| n.name))
}

// ===== ResultPage =====

/// One page of results for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T = Product> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Page number the server says it returned.
    pub current_page: u32,
    /// Pages available for this query.
    pub total_pages: u32,
    /// Matching products across all pages.
    pub total_count: u64,
}

// ===== Wire envelopes =====

/// `GET /product/search` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Products on this page.
    #[serde(default)]
    pub products: Vec<Product>,
    /// `totalPages`
    #[serde(default)]
    pub total_pages: u32,
    /// `currentPage`; 1 when missing.
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// `totalProducts`
    #[serde(default)]
    pub total_products: u64,
}

fn first_page() -> u32 {
    1
}

impl From<SearchResponse> for ResultPage {
    fn from(response: SearchResponse) -> Self {
        ResultPage {
            items: response.products,
            current_page: response.current_page.max(1),
            total_pages: response.total_pages,
            total_count: response.total_products,
        }
    }
}

/// `GET /category` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    /// Category entries.
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

/// `{ "categoryName": ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    /// Category name.
    pub category_name: String,
}

/// `GET /subcategory` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoriesResponse {
    /// Subcategory entries.
    #[serde(default)]
    pub subcategories: Vec<SubcategoryEntry>,
}

/// `{ "name": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryEntry {
    /// Subcategory name.
    pub name: String,
}
