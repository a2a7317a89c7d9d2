//! Event loop wiring tests: keys and worker events against a TestBackend.

use super::*;
use crate::engine::{Completion, EngineSettings, Phase};
use crate::model::{FetchFailure, OrderReceipt, OrderRequest, ResultPage, SortKey};
use crate::state::StatusLevel;
use crate::test_harness::{ids, page_of, ManualExecutor};
use ratatui::backend::TestBackend;
use std::thread;

/// Service for the calls the event loop makes itself (taxonomy, orders).
struct StubCatalog;

impl CatalogService for StubCatalog {
    fn search(&self, _query: &QueryState, _page_size: u32) -> Result<ResultPage, FetchFailure> {
        Err(FetchFailure::transient("searches go through the executor"))
    }

    fn list_categories(&self) -> Result<Vec<String>, FetchFailure> {
        Ok(vec!["Footwear".to_string()])
    }

    fn list_subcategories(&self) -> Result<Vec<String>, FetchFailure> {
        Err(FetchFailure::transient("down"))
    }

    fn create_order(&self, _order: &OrderRequest) -> Result<OrderReceipt, FetchFailure> {
        Ok(OrderReceipt {
            order_id: Some("o-1".to_string()),
        })
    }
}

fn create_test_app(
    term: &str,
    shipping: Option<&str>,
) -> (TuiApp<TestBackend>, ManualExecutor, Sender<WorkerEvent>) {
    let terminal = Terminal::new(TestBackend::new(120, 24)).expect("terminal");
    let executor = ManualExecutor::new();
    let settings = EngineSettings {
        quiet_period: Duration::from_millis(500),
        load_more_threshold: 3,
    };
    let engine = SearchEngine::new(
        QueryState::new(term, FilterSet::default(), SortKey::Newest),
        settings,
        Box::new(executor.clone()),
    );
    let (tx, rx) = mpsc::channel();
    let app = TuiApp::new_for_test(
        terminal,
        engine,
        Arc::new(StubCatalog),
        (tx.clone(), rx),
        shipping.map(str::to_string),
    );
    (app, executor, tx)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

/// Start the engine and answer its first fetch with `page`.
fn loaded(term: &str, page: ResultPage) -> (TuiApp<TestBackend>, ManualExecutor, Sender<WorkerEvent>) {
    let (mut app, executor, tx) = create_test_app(term, Some("addr-1"));
    app.engine.start();
    let ticket = executor.last().expect("initial fetch");
    tx.send(WorkerEvent::Fetched(Completion {
        ticket,
        outcome: Ok(page),
    }))
    .expect("send");
    assert!(app.drain_events());
    (app, executor, tx)
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    app.terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

/// Drain worker events until `done` holds or a second passes.
fn drain_until(app: &mut TuiApp<TestBackend>, done: impl Fn(&AppState) -> bool) {
    for _ in 0..100 {
        app.drain_events();
        if done(&app.app_state) {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("worker event never arrived");
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

// ===== Quit =====

#[test]
fn handle_key_ctrl_c_returns_true() {
    let (mut app, _, _) = create_test_app("", None);
    assert!(app.handle_key(ctrl('c')));
}

#[test]
fn typed_q_goes_to_search_instead_of_quitting() {
    let (mut app, _, _) = create_test_app("", None);
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert_eq!(app.app_state.search.text(), "q");
}

#[test]
fn esc_closes_panel_before_quitting() {
    let (mut app, _, _) = create_test_app("", None);
    assert!(!app.handle_key(key(KeyCode::F(4))));
    assert_eq!(app.app_state.panel, Panel::Cart);
    assert!(!app.handle_key(key(KeyCode::Esc)));
    assert_eq!(app.app_state.panel, Panel::None);
    assert!(app.handle_key(key(KeyCode::Esc)));
}

// ===== Search =====

#[test]
fn typing_schedules_a_debounced_search() {
    let (mut app, executor, _) = create_test_app("", None);
    app.handle_key(key(KeyCode::Char('s')));
    app.handle_key(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));

    assert_eq!(app.app_state.search.text(), "sH");
    assert_eq!(app.engine.query().term(), "sH");
    assert_eq!(app.engine.phase(), Phase::Debouncing);
    assert_eq!(executor.count(), 0, "Nothing fetched before the quiet period");
    assert!(app.poll_timeout(Instant::now()) <= IDLE_POLL);
}

#[test]
fn key_release_is_ignored() {
    let (mut app, _, _) = create_test_app("", None);
    let mut release = key(KeyCode::Char('x'));
    release.kind = KeyEventKind::Release;
    app.handle_key(release);
    assert_eq!(app.app_state.search.text(), "");
}

#[test]
fn cursor_keys_do_not_touch_the_engine() {
    let (mut app, _, _) = create_test_app("shoe", None);
    let revision = app.engine.revision();
    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Home));
    assert_eq!(app.app_state.search.cursor(), 0);
    assert_eq!(app.engine.revision(), revision);
}

#[test]
fn results_render_after_fetch_completes() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a", "b"], 1, 1));
    app.draw().expect("draw");
    let screen = screen(&app);
    assert!(screen.contains("Product a"));
    assert!(screen.contains("Product b"));
    assert!(screen.contains("Page 1/1"));
}

#[test]
fn short_first_page_loads_more_to_fill_the_screen() {
    let (app, executor, _) = loaded("shoe", page_of(&["a", "b"], 1, 3));
    assert_eq!(executor.count(), 2);
    assert_eq!(executor.last().map(|t| t.query.page()), Some(2));
    assert_eq!(app.engine.phase(), Phase::LoadingMore);
}

#[test]
fn failed_load_more_is_not_redispatched_by_the_loop() {
    let (mut app, executor, tx) = loaded("", page_of(&["a", "b"], 1, 3));
    assert_eq!(executor.count(), 2);

    let more = executor.last().expect("load-more");
    tx.send(WorkerEvent::Fetched(Completion {
        ticket: more,
        outcome: Err(FetchFailure::transient("503")),
    }))
    .expect("send");
    assert!(app.drain_events());
    for _ in 0..3 {
        app.handle_key(key(KeyCode::Down));
        app.drain_events();
    }

    assert_eq!(executor.count(), 2);
    assert!(matches!(app.engine.phase(), Phase::Failed(_)));
    app.draw().expect("draw");
    assert!(screen(&app).contains("press F5 to retry"));

    app.handle_key(key(KeyCode::F(5)));
    assert_eq!(executor.count(), 3);
    assert_eq!(executor.last().map(|t| t.query.page()), Some(1));
}

#[test]
fn failure_message_reaches_status_bar() {
    let (mut app, executor, tx) = create_test_app("shoe", None);
    app.engine.start();
    let ticket = executor.last().expect("fetch");
    tx.send(WorkerEvent::Fetched(Completion {
        ticket,
        outcome: Err(FetchFailure::transient("timed out")),
    }))
    .expect("send");
    app.drain_events();
    app.draw().expect("draw");
    assert!(screen(&app).contains("press F5 to retry"));
}

#[test]
fn cycle_sort_resets_and_reports() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a"], 1, 1));
    app.handle_key(key(KeyCode::F(3)));
    assert_eq!(app.engine.query().sort(), SortKey::PriceAscending);
    assert!(app.engine.display().items.is_empty());
    assert_eq!(
        app.app_state.status.as_ref().map(|s| s.text.as_str()),
        Some("Sort: Price: Low to High")
    );
}

// ===== Filters =====

#[test]
fn taxonomy_fills_pickers_and_tolerates_failure() {
    let (mut app, _, tx) = create_test_app("", None);
    spawn_taxonomy(Arc::clone(&app.service), tx);
    drain_until(&mut app, |state| !state.categories.is_empty());
    assert_eq!(app.app_state.categories, vec!["Footwear"]);
    assert!(app.app_state.subcategories.is_empty());
}

#[test]
fn filter_panel_applies_one_patch() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a"], 1, 1));
    app.app_state.categories = vec!["Footwear".to_string()];

    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::Right)); // Category: Footwear
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab)); // Min price
    app.handle_key(key(KeyCode::Char('2')));
    app.handle_key(key(KeyCode::Char('5')));
    assert!(!app.handle_key(key(KeyCode::Enter)));

    assert_eq!(app.app_state.panel, Panel::None);
    let filters = app.engine.query().filters();
    assert_eq!(filters.category.as_deref(), Some("Footwear"));
    assert_eq!(filters.min_price, Some(25.0));
    assert_eq!(app.engine.phase(), Phase::Debouncing);
}

#[test]
fn filter_panel_typing_does_not_reach_search() {
    let (mut app, _, _) = create_test_app("shoe", None);
    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::Char('x')));
    assert_eq!(app.app_state.search.text(), "shoe");
}

#[test]
fn unparsable_price_keeps_panel_open() {
    let (mut app, _, _) = create_test_app("shoe", None);
    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char('.')));
    app.handle_key(key(KeyCode::Enter));

    assert!(matches!(app.app_state.panel, Panel::Filters(_)));
    assert_eq!(
        app.app_state.status.as_ref().map(|s| s.level),
        Some(StatusLevel::Error)
    );
    assert!(app.engine.query().filters().is_empty());
}

#[test]
fn esc_cancels_filter_edits() {
    let (mut app, _, _) = create_test_app("shoe", None);
    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char('9')));
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.app_state.panel, Panel::None);
    assert!(app.engine.query().filters().is_empty());
}

// ===== Cart and orders =====

#[test]
fn enter_adds_selected_product_to_cart() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a", "b"], 1, 1));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    let cart_ids: Vec<&str> = app
        .app_state
        .cart
        .lines()
        .iter()
        .map(|l| l.product_id.as_str())
        .collect();
    assert_eq!(cart_ids, vec!["b"]);
    assert_eq!(ids(&app.engine.display().items), vec!["a", "b"]);
}

#[test]
fn cart_panel_adjusts_quantity() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a"], 1, 1));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::F(4)));
    app.handle_key(key(KeyCode::Char('+')));
    app.handle_key(key(KeyCode::Char('+')));
    app.handle_key(key(KeyCode::Char('-')));
    assert_eq!(app.app_state.cart.lines()[0].quantity, 2);
    assert_eq!(app.app_state.search.text(), "shoe");
}

#[test]
fn order_without_shipping_address_is_refused() {
    let (mut app, _, _) = create_test_app("shoe", None);
    app.engine.start();
    app.app_state.cart.add(&crate::test_harness::product("a"));
    app.handle_key(ctrl('o'));
    assert!(!app.app_state.order_in_flight);
    assert_eq!(
        app.app_state.status.as_ref().map(|s| s.level),
        Some(StatusLevel::Error)
    );
}

#[test]
fn placed_order_clears_cart() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a"], 1, 1));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(ctrl('o'));
    assert!(app.app_state.order_in_flight);

    drain_until(&mut app, |state| !state.order_in_flight);
    assert!(app.app_state.cart.is_empty());
    assert_eq!(
        app.app_state.status.as_ref().map(|s| s.text.as_str()),
        Some("Order o-1 placed")
    );
}

#[test]
fn draw_renders_panels_without_error() {
    let (mut app, _, _) = loaded("shoe", page_of(&["a"], 1, 1));
    app.handle_key(key(KeyCode::F(2)));
    app.draw().expect("filters");
    assert!(screen(&app).contains("Filters"));
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::F(4)));
    app.draw().expect("cart");
    assert!(screen(&app).contains("Cart is empty"));
}
