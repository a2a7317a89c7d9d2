//! Query values: what the engine is asked to fetch.
//!
//! Everything here is an immutable value. Edits build a new `QueryState`
//! through the `with_*` methods; nothing is mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== SortKey =====

/// Result ordering, drawn from the fixed catalog the remote service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    /// Most recently created first (`createdAt`).
    #[default]
    Newest,
    /// `price`
    PriceAscending,
    /// `-price`
    PriceDescending,
    /// `name`
    NameAscending,
    /// `-name`
    NameDescending,
}

impl SortKey {
    /// All keys in cycling order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::NameAscending,
        SortKey::NameDescending,
    ];

    /// Value sent as the `sort` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            SortKey::Newest => "createdAt",
            SortKey::PriceAscending => "price",
            SortKey::PriceDescending => "-price",
            SortKey::NameAscending => "name",
            SortKey::NameDescending => "-name",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::PriceAscending => "Price: Low to High",
            SortKey::PriceDescending => "Price: High to Low",
            SortKey::NameAscending => "Name A-Z",
            SortKey::NameDescending => "Name Z-A",
        }
    }

    /// Next key in cycling order, wrapping at the end.
    pub fn next(self) -> SortKey {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown sort key name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key '{0}' (expected newest, price-asc, price-desc, name-asc or name-desc)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts the wire value (`-price`) or a kebab-case name (`price-desc`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdAt" | "newest" => Ok(SortKey::Newest),
            "price" | "price-asc" | "price-ascending" => Ok(SortKey::PriceAscending),
            "-price" | "price-desc" | "price-descending" => Ok(SortKey::PriceDescending),
            "name" | "name-asc" | "name-ascending" => Ok(SortKey::NameAscending),
            "-name" | "name-desc" | "name-descending" => Ok(SortKey::NameDescending),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = UnknownSortKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.wire_value().to_string()
    }
}

// ===== FilterSet =====

/// Structured filters.
///
/// `min_price <= max_price` is not enforced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSet {
    /// Category name, `None` for all.
    pub category: Option<String>,
    /// Subcategory name, `None` for all.
    pub subcategory: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl FilterSet {
    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.subcategory.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Apply a partial update, returning the merged set.
    ///
    /// Blank category/subcategory names and non-finite prices normalise to
    /// "no filter".
    pub fn merged(&self, patch: &FilterPatch) -> FilterSet {
        let mut next = self.clone();
        if let Some(category) = &patch.category {
            next.category = normalize_name(category.as_deref());
        }
        if let Some(subcategory) = &patch.subcategory {
            next.subcategory = normalize_name(subcategory.as_deref());
        }
        if let Some(min_price) = patch.min_price {
            next.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            next.max_price = max_price;
        }
        next.normalized()
    }

    /// Drop prices that are NaN or infinite.
    ///
    /// A NaN price is unequal to itself, so a query carrying one would never
    /// match its own lineage.
    pub fn normalized(mut self) -> FilterSet {
        self.min_price = self.min_price.filter(|p| p.is_finite());
        self.max_price = self.max_price.filter(|p| p.is_finite());
        self
    }
}

fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Partial `FilterSet` update.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPatch {
    /// Category update.
    pub category: Option<Option<String>>,
    /// Subcategory update.
    pub subcategory: Option<Option<String>>,
    /// Lower price bound update.
    pub min_price: Option<Option<f64>>,
    /// Upper price bound update.
    pub max_price: Option<Option<f64>>,
}

impl FilterPatch {
    /// Patch that sets or clears the category only.
    pub fn category(name: Option<String>) -> Self {
        Self {
            category: Some(name),
            ..Self::default()
        }
    }

    /// Patch that sets or clears the subcategory only.
    pub fn subcategory(name: Option<String>) -> Self {
        Self {
            subcategory: Some(name),
            ..Self::default()
        }
    }

    /// Patch that replaces both price bounds.
    pub fn price_range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min_price: Some(min),
            max_price: Some(max),
            ..Self::default()
        }
    }

    /// True if applying this patch cannot change anything.
    pub fn is_noop(&self) -> bool {
        self == &Self::default()
    }
}

// ===== Lineage =====

/// The base query: (term, filters, sort) without the page number.
///
/// Requests are only comparable for staleness within one lineage.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    /// Search text.
    pub term: String,
    /// Structured filters.
    pub filters: FilterSet,
    /// Result ordering.
    pub sort: SortKey,
}

// ===== QueryState =====

/// Everything needed to fetch one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    term: String,
    filters: FilterSet,
    sort: SortKey,
    page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new("", FilterSet::default(), SortKey::default())
    }
}

impl QueryState {
    /// Page-1 query for the given base query. Non-finite prices are dropped.
    pub fn new(term: impl Into<String>, filters: FilterSet, sort: SortKey) -> Self {
        Self {
            term: term.into(),
            filters: filters.normalized(),
            sort,
            page: 1,
        }
    }

    /// Search text as typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Active filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Active sort.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Page number, always >= 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// True for page-1 queries (fresh search, filter or sort change, refresh).
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// The base query without the page number.
    pub fn lineage(&self) -> Lineage {
        Lineage {
            term: self.term.clone(),
            filters: self.filters.clone(),
            sort: self.sort,
        }
    }

    /// True when both queries share term, filters and sort.
    pub fn same_lineage(&self, other: &QueryState) -> bool {
        self.term == other.term && self.filters == other.filters && self.sort == other.sort
    }

    /// New page-1 query with the term replaced.
    pub fn with_term(&self, term: impl Into<String>) -> Self {
        Self::new(term, self.filters.clone(), self.sort)
    }

    /// New page-1 query with the filters replaced.
    pub fn with_filters(&self, filters: FilterSet) -> Self {
        Self::new(self.term.clone(), filters, self.sort)
    }

    /// New page-1 query with the sort replaced.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self::new(self.term.clone(), self.filters.clone(), sort)
    }

    /// Same base query at an explicit page (clamped to >= 1).
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Same base query at page 1.
    pub fn first_page(&self) -> Self {
        self.at_page(1)
    }

    /// Continuation: same base query, next page.
    pub fn next_page(&self) -> Self {
        self.at_page(self.page.saturating_add(1))
    }
}
