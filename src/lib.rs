//! catbrowse
//!
//! Terminal client for searching, filtering and ordering from a remote
//! product catalog.
//!
//! The search engine (`engine`) and UI state (`state`) are pure and driven
//! with explicit timestamps; `client` and `view` are the impure shell that
//! talks to the network and the terminal.

pub mod client;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
