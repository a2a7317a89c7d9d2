//! Remote catalog access (impure shell).
//!
//! [`CatalogService`] is the seam between the engine and the network.
//! [`ThreadedExecutor`] runs each search on its own worker thread and reports
//! back over an mpsc channel, which the event loop drains.

pub mod http;

pub use http::HttpCatalog;

use crate::engine::{Completion, FetchExecutor, RequestTicket};
use crate::model::{FetchFailure, OrderReceipt, OrderRequest, QueryState, ResultPage};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// The remote catalog collaborator.
pub trait CatalogService: Send + Sync {
    /// One page of products matching `query` (its page number included).
    fn search(&self, query: &QueryState, page_size: u32) -> Result<ResultPage, FetchFailure>;

    /// Category names for the filter picker.
    fn list_categories(&self) -> Result<Vec<String>, FetchFailure>;

    /// Subcategory names for the filter picker.
    fn list_subcategories(&self) -> Result<Vec<String>, FetchFailure>;

    /// Submit an order.
    fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchFailure>;
}

/// Messages from worker threads to the event loop.
#[derive(Debug)]
pub enum WorkerEvent {
    /// A search finished (possibly for a superseded ticket).
    Fetched(Completion),
    /// Category and subcategory names for the filter pickers.
    Taxonomy {
        /// Category names, or why they could not be loaded.
        categories: Result<Vec<String>, FetchFailure>,
        /// Subcategory names, or why they could not be loaded.
        subcategories: Result<Vec<String>, FetchFailure>,
    },
    /// An order submission finished.
    OrderPlaced(Result<OrderReceipt, FetchFailure>),
}

// ===== ThreadedExecutor =====

/// Runs every submitted fetch on a fresh named thread.
///
/// Superseded fetches are not aborted; they finish and are discarded when
/// the engine resolves them.
pub struct ThreadedExecutor {
    service: Arc<dyn CatalogService>,
    page_size: u32,
    tx: Sender<WorkerEvent>,
}

impl ThreadedExecutor {
    /// Executor fetching `page_size` products per page and reporting on `tx`.
    pub fn new(service: Arc<dyn CatalogService>, page_size: u32, tx: Sender<WorkerEvent>) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            tx,
        }
    }
}

impl FetchExecutor for ThreadedExecutor {
    fn submit(&mut self, ticket: RequestTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let page_size = self.page_size;
        let worker_ticket = ticket.clone();

        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", ticket.sequence))
            .spawn(move || {
                let outcome = service.search(&worker_ticket.query, page_size);
                // Receiver gone means the UI has shut down.
                let _ = tx.send(WorkerEvent::Fetched(Completion {
                    ticket: worker_ticket,
                    outcome,
                }));
            });

        if let Err(e) = spawned {
            warn!(sequence = ticket.sequence, error = %e, "Failed to spawn fetch worker");
            let _ = self.tx.send(WorkerEvent::Fetched(Completion {
                ticket,
                outcome: Err(FetchFailure::transient(format!(
                    "Could not start request: {e}"
                ))),
            }));
        }
    }
}

/// Load the filter picker lists in the background.
pub fn spawn_taxonomy(service: Arc<dyn CatalogService>, tx: Sender<WorkerEvent>) {
    let spawned = thread::Builder::new()
        .name("taxonomy".to_string())
        .spawn(move || {
            let categories = service.list_categories();
            let subcategories = service.list_subcategories();
            let _ = tx.send(WorkerEvent::Taxonomy {
                categories,
                subcategories,
            });
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Failed to spawn taxonomy worker");
    }
}

/// Submit an order in the background.
pub fn spawn_order(service: Arc<dyn CatalogService>, order: OrderRequest, tx: Sender<WorkerEvent>) {
    debug!(lines = order.cart_items.len(), total = order.total_amount, "Placing order");
    let fallback = tx.clone();
    let spawned = thread::Builder::new()
        .name("order".to_string())
        .spawn(move || {
            let receipt = service.create_order(&order);
            let _ = tx.send(WorkerEvent::OrderPlaced(receipt));
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Failed to spawn order worker");
        let _ = fallback.send(WorkerEvent::OrderPlaced(Err(FetchFailure::transient(
            format!("Could not start request: {e}"),
        ))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, ProductId};
    use crate::test_harness::page_of;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Service that answers from canned data and records page sizes.
    #[derive(Default)]
    struct CannedCatalog {
        page_sizes: Mutex<Vec<u32>>,
        fail_search: bool,
    }

    impl CatalogService for CannedCatalog {
        fn search(&self, query: &QueryState, page_size: u32) -> Result<ResultPage, FetchFailure> {
            self.page_sizes.lock().expect("lock").push(page_size);
            if self.fail_search {
                return Err(FetchFailure::transient("service unavailable"));
            }
            Ok(page_of(&["a"], query.page(), 2))
        }

        fn list_categories(&self) -> Result<Vec<String>, FetchFailure> {
            Ok(vec!["Footwear".to_string()])
        }

        fn list_subcategories(&self) -> Result<Vec<String>, FetchFailure> {
            Err(FetchFailure::transient("connection refused"))
        }

        fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchFailure> {
            Ok(OrderReceipt {
                order_id: Some(format!("order-{}", order.cart_items.len())),
            })
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn threaded_executor_reports_completion_for_ticket() {
        let (tx, rx) = mpsc::channel();
        let service = Arc::new(CannedCatalog::default());
        let mut executor = ThreadedExecutor::new(service.clone(), 25, tx);

        let ticket = RequestTicket {
            sequence: 7,
            query: QueryState::default().at_page(2),
        };
        executor.submit(ticket.clone());

        match rx.recv_timeout(WAIT).expect("completion") {
            WorkerEvent::Fetched(completion) => {
                assert_eq!(completion.ticket, ticket);
                let page = completion.outcome.expect("ok");
                assert_eq!(page.current_page, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(*service.page_sizes.lock().expect("lock"), vec![25]);
    }

    #[test]
    fn threaded_executor_forwards_failures() {
        let (tx, rx) = mpsc::channel();
        let service = Arc::new(CannedCatalog {
            fail_search: true,
            ..CannedCatalog::default()
        });
        let mut executor = ThreadedExecutor::new(service, 10, tx);
        executor.submit(RequestTicket {
            sequence: 1,
            query: QueryState::default(),
        });

        match rx.recv_timeout(WAIT).expect("completion") {
            WorkerEvent::Fetched(completion) => {
                let failure = completion.outcome.expect_err("failure");
                assert!(failure.kind.is_retryable());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let (tx, rx) = mpsc::channel();
        let service = Arc::new(CannedCatalog::default());
        let mut executor = ThreadedExecutor::new(service.clone(), 0, tx);
        executor.submit(RequestTicket {
            sequence: 1,
            query: QueryState::default(),
        });
        rx.recv_timeout(WAIT).expect("completion");
        assert_eq!(*service.page_sizes.lock().expect("lock"), vec![1]);
    }

    #[test]
    fn taxonomy_reports_both_lists() {
        let (tx, rx) = mpsc::channel();
        spawn_taxonomy(Arc::new(CannedCatalog::default()), tx);

        match rx.recv_timeout(WAIT).expect("taxonomy") {
            WorkerEvent::Taxonomy {
                categories,
                subcategories,
            } => {
                assert_eq!(categories.expect("ok"), vec!["Footwear"]);
                assert!(subcategories.is_err());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn order_reports_receipt() {
        let (tx, rx) = mpsc::channel();
        let order = OrderRequest {
            cart_items: vec![OrderItem {
                product: ProductId::new("p1").expect("valid id"),
                quantity: 2,
            }],
            shipping_address_id: "addr-1".to_string(),
            total_amount: 20.0,
        };
        spawn_order(Arc::new(CannedCatalog::default()), order, tx);

        match rx.recv_timeout(WAIT).expect("order") {
            WorkerEvent::OrderPlaced(Ok(receipt)) => {
                assert_eq!(receipt.order_id.as_deref(), Some("order-1"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
