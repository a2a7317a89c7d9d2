//! Harness for driving `SearchEngine` from integration tests.
//!
//! `RecordingExecutor` keeps every submitted ticket so a test decides when,
//! and in which order, each fetch completes.

#![allow(dead_code)] // Not every test file uses every helper

use catbrowse::engine::{
    Completion, EngineSettings, FetchExecutor, RequestTicket, SearchEngine,
};
use catbrowse::model::{FetchFailure, FilterSet, Product, ProductId, QueryState, ResultPage, SortKey};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const QUIET: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    submitted: Rc<RefCell<Vec<RequestTicket>>>,
}

impl RecordingExecutor {
    pub fn submitted(&self) -> Vec<RequestTicket> {
        self.submitted.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.submitted.borrow().len()
    }

    pub fn last(&self) -> RequestTicket {
        self.submitted
            .borrow()
            .last()
            .cloned()
            .expect("at least one fetch was submitted")
    }
}

impl FetchExecutor for RecordingExecutor {
    fn submit(&mut self, ticket: RequestTicket) {
        self.submitted.borrow_mut().push(ticket);
    }
}

/// Engine with a 500 ms quiet period and a load-more threshold of 3 rows.
pub fn engine(term: &str) -> (SearchEngine, RecordingExecutor) {
    let executor = RecordingExecutor::default();
    let engine = SearchEngine::new(
        QueryState::new(term, FilterSet::default(), SortKey::Newest),
        EngineSettings {
            quiet_period: QUIET,
            load_more_threshold: 3,
        },
        Box::new(executor.clone()),
    );
    (engine, executor)
}

pub fn product(id: &str) -> Product {
    Product {
        id: ProductId::new(id).expect("fixture ids are non-empty"),
        name: format!("Product {id}"),
        description: String::new(),
        price: 10.0,
        category: None,
        subcategory: None,
        images: vec![],
        brand: None,
        tags: vec![],
    }
}

pub fn page(ids: &[&str], current_page: u32, total_pages: u32) -> ResultPage {
    ResultPage {
        items: ids.iter().map(|id| product(id)).collect(),
        current_page,
        total_pages,
        total_count: u64::from(total_pages) * 10,
    }
}

pub fn succeed(ticket: RequestTicket, page: ResultPage) -> Completion {
    Completion {
        ticket,
        outcome: Ok(page),
    }
}

pub fn fail(ticket: RequestTicket, failure: FetchFailure) -> Completion {
    Completion {
        ticket,
        outcome: Err(failure),
    }
}

pub fn ids(items: &[Product]) -> Vec<String> {
    items.iter().map(|p| p.id.as_str().to_string()).collect()
}
