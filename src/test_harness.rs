//! Shared fixtures for unit tests.
//!
//! `ManualExecutor` records submitted tickets instead of running them, so a
//! test decides when (and in which order) each fetch completes.

use crate::engine::{FetchExecutor, RequestTicket};
use crate::model::{Product, ProductId, ResultPage};
use std::cell::RefCell;
use std::rc::Rc;

/// Executor that only records what was submitted.
#[derive(Debug, Clone, Default)]
pub struct ManualExecutor {
    submitted: Rc<RefCell<Vec<RequestTicket>>>,
}

impl ManualExecutor {
    /// Executor with nothing submitted yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every ticket submitted so far, oldest first.
    pub fn submitted(&self) -> Vec<RequestTicket> {
        self.submitted.borrow().clone()
    }

    /// Number of tickets submitted so far.
    pub fn count(&self) -> usize {
        self.submitted.borrow().len()
    }

    /// The most recently submitted ticket.
    pub fn last(&self) -> Option<RequestTicket> {
        self.submitted.borrow().last().cloned()
    }
}

impl FetchExecutor for ManualExecutor {
    fn submit(&mut self, ticket: RequestTicket) {
        self.submitted.borrow_mut().push(ticket);
    }
}

/// A product whose name and price derive from its id.
pub fn product(id: &str) -> Product {
    Product {
        id: ProductId::new(id).expect("fixture ids are non-empty"),
        name: format!("Product {id}"),
        description: String::new(),
        price: 10.0,
        category: Some("Footwear".to_string()),
        subcategory: Some("Running".to_string()),
        images: vec![],
        brand: None,
        tags: vec![],
    }
}

/// A result page holding products with the given ids.
pub fn page_of(ids: &[&str], current_page: u32, total_pages: u32) -> ResultPage {
    ResultPage {
        items: ids.iter().map(|id| product(id)).collect(),
        current_page,
        total_pages,
        total_count: u64::from(total_pages) * 10,
    }
}

/// Ids of a product slice, for compact assertions.
pub fn ids(items: &[Product]) -> Vec<&str> {
    items.iter().map(|p| p.id.as_str()).collect()
}
