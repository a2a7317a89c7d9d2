//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod filter_editor;
pub mod result_list;
pub mod search_input_handler;

// Re-export for convenience
pub use app_state::{AppState, Panel, StatusLevel, StatusMessage};
pub use filter_editor::{FilterEditor, FilterField, FilterInputError};
pub use result_list::ResultList;
pub use search_input_handler::SearchBuffer;
