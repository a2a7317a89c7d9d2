//! TUI rendering and terminal management (impure shell)

mod layout;
mod panels;
mod product_list;
mod search_input;
mod status_bar;
mod styles;

pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use product_list::{viewport_rows, ProductList};
pub use search_input::SearchInput;
pub use status_bar::{filter_chips, phase_label, StatusBar};
pub use styles::{ColorConfig, Theme};

use crate::client::{spawn_order, spawn_taxonomy, CatalogService, ThreadedExecutor, WorkerEvent};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::engine::SearchEngine;
use crate::model::{AppError, FilterSet, KeyAction, QueryState};
use crate::state::{filter_editor, result_list, search_input_handler, AppState, Panel};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest the loop waits for input before checking worker results.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    engine: SearchEngine,
    key_bindings: KeyBindings,
    theme: Theme,
    service: Arc<dyn CatalogService>,
    events: Receiver<WorkerEvent>,
    events_tx: Sender<WorkerEvent>,
    shipping_address_id: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        config: &ResolvedConfig,
        initial_term: &str,
        colors: ColorConfig,
        service: Arc<dyn CatalogService>,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (tx, rx) = mpsc::channel();
        let executor = ThreadedExecutor::new(Arc::clone(&service), config.page_size, tx.clone());
        let initial = QueryState::new(initial_term, FilterSet::default(), config.default_sort);
        let engine = SearchEngine::new(initial, config.engine_settings(), Box::new(executor));

        Ok(Self::from_parts(
            terminal,
            AppState::new(initial_term),
            engine,
            Theme::with_color_config(colors),
            service,
            (tx, rx),
            config.shipping_address_id.clone(),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws on input, on worker results and
    /// when the debounce quiet period fires.
    pub fn run(&mut self) -> Result<(), TuiError> {
        spawn_taxonomy(Arc::clone(&self.service), self.events_tx.clone());
        self.engine.start();
        self.draw()?;

        loop {
            let mut dirty = self.drain_events();
            if self.engine.tick(Instant::now()) {
                dirty = true;
            }
            if dirty {
                self.draw()?;
            }

            if event::poll(self.poll_timeout(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn from_parts(
        terminal: Terminal<B>,
        mut app_state: AppState,
        engine: SearchEngine,
        theme: Theme,
        service: Arc<dyn CatalogService>,
        (events_tx, events): (Sender<WorkerEvent>, Receiver<WorkerEvent>),
        shipping_address_id: Option<String>,
    ) -> Self {
        if let Ok(size) = terminal.size() {
            let areas = calculate_areas(Rect::new(0, 0, size.width, size.height));
            app_state.list_viewport = viewport_rows(areas.list.height);
        }
        Self {
            terminal,
            app_state,
            engine,
            key_bindings: KeyBindings::default(),
            theme,
            service,
            events,
            events_tx,
            shipping_address_id,
        }
    }

    /// Wait until the next debounce deadline, but never longer than
    /// [`IDLE_POLL`] so worker results are picked up promptly.
    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.engine.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Apply everything the workers have reported since the last call.
    ///
    /// Returns true if anything arrived.
    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            match event {
                WorkerEvent::Fetched(completion) => {
                    self.engine.resolve(completion);
                }
                WorkerEvent::Taxonomy {
                    categories,
                    subcategories,
                } => {
                    if let Err(e) = &categories {
                        warn!(reason = %e.reason, "Could not load categories");
                    }
                    if let Err(e) = &subcategories {
                        warn!(reason = %e.reason, "Could not load subcategories");
                    }
                    self.app_state.set_taxonomy(categories, subcategories);
                }
                WorkerEvent::OrderPlaced(result) => {
                    match &result {
                        Ok(receipt) => info!(order_id = ?receipt.order_id, "Order placed"),
                        Err(e) => warn!(reason = %e.reason, "Order failed"),
                    }
                    self.app_state.finish_order(result);
                }
            }
        }
        if changed {
            self.sync_results();
        }
        changed
    }

    /// Re-clamp the selection to the engine's list and load more if the
    /// viewport is near its end.
    fn sync_results(&mut self) {
        let len = self.engine.display().items.len();
        let viewport = self.app_state.list_viewport;
        self.app_state.results = result_list::fit(self.app_state.results, len, viewport);
        let proximity = self.app_state.results.proximity_to_end(len, viewport);
        self.engine.on_scroll(proximity);
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let now = Instant::now();

        match self.app_state.panel {
            Panel::Filters(_) => return self.handle_filter_key(key, now),
            Panel::Cart => {
                if self.handle_cart_key(key) {
                    return false;
                }
            }
            Panel::None => {}
        }

        match self.key_bindings.get(key) {
            Some(action) => self.handle_action(action, now),
            None => {
                if let KeyCode::Char(ch) = key.code {
                    let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
                    if plain && self.app_state.panel == Panel::None {
                        self.edit_search(|b| search_input_handler::handle_char_input(b, ch), now);
                    }
                }
                false
            }
        }
    }

    fn handle_action(&mut self, action: KeyAction, now: Instant) -> bool {
        let len = self.engine.display().items.len();
        let viewport = self.app_state.list_viewport;
        let results = self.app_state.results;

        match action {
            KeyAction::SelectUp => self.move_selection(result_list::select_up(results, len, viewport)),
            KeyAction::SelectDown => {
                self.move_selection(result_list::select_down(results, len, viewport))
            }
            KeyAction::PageUp => self.move_selection(result_list::page_up(results, len, viewport)),
            KeyAction::PageDown => {
                self.move_selection(result_list::page_down(results, len, viewport))
            }
            KeyAction::SelectFirst => {
                self.move_selection(result_list::select_first(results, len, viewport))
            }
            KeyAction::SelectLast => {
                self.move_selection(result_list::select_last(results, len, viewport))
            }

            KeyAction::CursorLeft => self.move_cursor(search_input_handler::handle_cursor_left),
            KeyAction::CursorRight => self.move_cursor(search_input_handler::handle_cursor_right),
            KeyAction::CursorHome => self.move_cursor(search_input_handler::handle_cursor_home),
            KeyAction::CursorEnd => self.move_cursor(search_input_handler::handle_cursor_end),
            KeyAction::Backspace => self.edit_search(search_input_handler::handle_backspace, now),
            KeyAction::DeleteForward => self.edit_search(search_input_handler::handle_delete, now),
            KeyAction::ClearSearch => self.edit_search(search_input_handler::handle_clear, now),

            KeyAction::Refresh => {
                self.app_state.clear_status();
                self.engine.on_refresh();
            }
            KeyAction::CycleSort => {
                let sort = self.engine.query().sort().next();
                if self.engine.on_sort_changed(sort, now) {
                    self.app_state.set_info(format!("Sort: {}", sort.label()));
                    self.sync_results();
                }
            }
            KeyAction::OpenFilters => {
                let current = self.engine.query().filters().clone();
                self.app_state.open_filters(&current);
            }

            KeyAction::AddToCart => {
                self.app_state
                    .add_selected_to_cart(&self.engine.display().items);
            }
            KeyAction::ToggleCart => self.app_state.toggle_cart(),
            KeyAction::RemoveFromCart => {
                self.app_state.remove_cart_selection();
            }
            KeyAction::PlaceOrder => {
                if let Some(order) = self
                    .app_state
                    .begin_order(self.shipping_address_id.as_deref())
                {
                    spawn_order(Arc::clone(&self.service), order, self.events_tx.clone());
                }
            }

            KeyAction::Back => return !self.app_state.close_panel(),
            KeyAction::Quit => return true,
        }
        false
    }

    fn move_selection(&mut self, results: result_list::ResultList) {
        self.app_state.results = results;
        self.sync_results();
    }

    fn move_cursor(&mut self, f: fn(search_input_handler::SearchBuffer) -> search_input_handler::SearchBuffer) {
        let buffer = std::mem::take(&mut self.app_state.search);
        self.app_state.search = f(buffer);
    }

    /// Edit the search text and tell the engine if the term changed.
    fn edit_search(
        &mut self,
        f: impl FnOnce(search_input_handler::SearchBuffer) -> search_input_handler::SearchBuffer,
        now: Instant,
    ) {
        let buffer = std::mem::take(&mut self.app_state.search);
        self.app_state.search = f(buffer);
        if self
            .engine
            .on_term_changed(self.app_state.search.text(), now)
        {
            self.sync_results();
        }
    }

    /// Keys while the filter panel is open. Returns true to quit.
    fn handle_filter_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Panel::Filters(editor) = std::mem::take(&mut self.app_state.panel) else {
            return false;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let editor = match key.code {
            KeyCode::Esc => return false,
            KeyCode::Enter => {
                match editor.to_patch() {
                    Ok(patch) => {
                        self.app_state.clear_status();
                        if self.engine.on_filter_changed(&patch, now) {
                            self.sync_results();
                        }
                    }
                    Err(e) => {
                        self.app_state.set_error(e.to_string());
                        self.app_state.panel = Panel::Filters(editor);
                    }
                }
                return false;
            }
            KeyCode::Tab | KeyCode::Down => filter_editor::next_field(editor),
            KeyCode::BackTab | KeyCode::Up => filter_editor::prev_field(editor),
            KeyCode::Left => filter_editor::cycle_option(editor, -1),
            KeyCode::Right => filter_editor::cycle_option(editor, 1),
            KeyCode::Backspace => filter_editor::backspace(editor),
            KeyCode::Char(ch) => filter_editor::input_char(editor, ch),
            _ => editor,
        };
        self.app_state.panel = Panel::Filters(editor);
        false
    }

    /// Keys only the cart panel understands. Returns true if consumed.
    fn handle_cart_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.app_state.cart_select_up(),
            KeyCode::Down => self.app_state.cart_select_down(),
            KeyCode::Char('+') => {
                self.app_state.adjust_cart_quantity(1);
            }
            KeyCode::Char('-') => {
                self.app_state.adjust_cart_quantity(-1);
            }
            _ => return false,
        }
        true
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let areas = calculate_areas(Rect::new(0, 0, size.width, size.height));
        let viewport = viewport_rows(areas.list.height);
        if viewport != self.app_state.list_viewport {
            self.app_state.list_viewport = viewport;
            self.sync_results();
        }

        let state = &self.app_state;
        let engine = &self.engine;
        let theme = &self.theme;
        self.terminal.draw(|frame| {
            render_layout(frame, state, engine, theme);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        engine: SearchEngine,
        service: Arc<dyn CatalogService>,
        events: (Sender<WorkerEvent>, Receiver<WorkerEvent>),
        shipping_address_id: Option<String>,
    ) -> Self {
        let term = engine.query().term().to_string();
        Self::from_parts(
            terminal,
            AppState::new(&term),
            engine,
            Theme::default(),
            service,
            events,
            shipping_address_id,
        )
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when setup or the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    config: &ResolvedConfig,
    initial_term: &str,
    colors: ColorConfig,
    service: Arc<dyn CatalogService>,
) -> Result<(), TuiError> {
    let result = TuiApp::new(config, initial_term, colors, service).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
