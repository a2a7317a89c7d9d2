//! Configuration file loading with precedence handling.

use crate::engine::EngineSettings;
use crate::model::SortKey;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default catalog API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "CATBROWSE_CONFIG";
/// Environment variable overriding the API root.
pub const BASE_URL_ENV_VAR: &str = "CATBROWSE_BASE_URL";
/// Environment variable carrying the bearer token for order creation.
pub const TOKEN_ENV_VAR: &str = "CATBROWSE_TOKEN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/catbrowse/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Catalog API root, e.g. `https://shop.example.com/api`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Products requested per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Quiet period before a typed query is sent, in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Rows from the end of the list at which the next page loads.
    #[serde(default)]
    pub load_more_threshold: Option<usize>,

    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Sort applied at startup (`createdAt`, `price`, `-price`, `name`, `-name`).
    #[serde(default)]
    pub default_sort: Option<SortKey>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Address id sent with orders.
    #[serde(default)]
    pub shipping_address_id: Option<String>,

    /// Bearer token for order creation.
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API root of the catalog service.
    pub base_url: String,
    /// Always at least 1.
    pub page_size: u32,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u64,
    /// Rows from the end at which the next page loads.
    pub load_more_threshold: usize,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Sort applied at startup.
    pub default_sort: SortKey,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Address id sent with orders.
    pub shipping_address_id: Option<String>,
    /// Bearer token for order creation.
    pub api_token: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 10,
            debounce_ms: 500,
            load_more_threshold: 3,
            request_timeout_secs: 10,
            default_sort: SortKey::Newest,
            log_file_path: default_log_path(),
            shipping_address_id: None,
            api_token: None,
        }
    }
}

// The token must never reach the log file.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("debounce_ms", &self.debounce_ms)
            .field("load_more_threshold", &self.load_more_threshold)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("default_sort", &self.default_sort)
            .field("log_file_path", &self.log_file_path)
            .field("shipping_address_id", &self.shipping_address_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ResolvedConfig {
    /// Engine tunables derived from this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            quiet_period: Duration::from_millis(self.debounce_ms),
            load_more_threshold: self.load_more_threshold,
        }
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/catbrowse/catbrowse.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("catbrowse").join("catbrowse.log")
    } else {
        PathBuf::from("catbrowse.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/catbrowse/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("catbrowse").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CATBROWSE_CONFIG` environment variable
/// 3. Default path `~/.config/catbrowse/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if !env_path.trim().is_empty() => {
            return load_config_file(PathBuf::from(env_path));
        }
        Ok(_) => {}
        Err(std::env::VarError::NotPresent) => {}
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CATBROWSE_BASE_URL`: Override API root
/// - `CATBROWSE_TOKEN`: Bearer token for orders
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(url) = non_empty_env(BASE_URL_ENV_VAR) {
        config.base_url = url;
    }
    if let Some(token) = non_empty_env(TOKEN_ENV_VAR) {
        config.api_token = Some(token);
    }
    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A zero `page_size` is raised to 1.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        base_url: config.base_url.unwrap_or(defaults.base_url),
        page_size: config.page_size.unwrap_or(defaults.page_size).max(1),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        load_more_threshold: config
            .load_more_threshold
            .unwrap_or(defaults.load_more_threshold),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        default_sort: config.default_sort.unwrap_or(defaults.default_sort),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        shipping_address_id: config.shipping_address_id.or(defaults.shipping_address_id),
        api_token: config.api_token.or(defaults.api_token),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    base_url_override: Option<String>,
    page_size_override: Option<u32>,
    debounce_override: Option<u64>,
    sort_override: Option<SortKey>,
) -> ResolvedConfig {
    if let Some(url) = base_url_override {
        config.base_url = url;
    }
    if let Some(page_size) = page_size_override {
        config.page_size = page_size.max(1);
    }
    if let Some(debounce_ms) = debounce_override {
        config.debounce_ms = debounce_ms;
    }
    if let Some(sort) = sort_override {
        config.default_sort = sort;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
