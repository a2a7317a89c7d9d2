//! catbrowse - Entry Point

use catbrowse::client::{CatalogService, HttpCatalog};
use catbrowse::model::{AppError, SortKey};
use catbrowse::view::ColorConfig;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// catbrowse - browse, filter and order from a remote product catalog
#[derive(Parser, Debug)]
#[command(name = "catbrowse")]
#[command(version)]
#[command(about = "Terminal client for searching a remote product catalog")]
pub struct Args {
    /// Initial search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// API root of the catalog service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Products requested per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Quiet period after the last keystroke before searching, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Initial sort: newest, price-asc, price-desc, name-asc or name-desc
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file =
            catbrowse::config::load_config_with_precedence(args.config.clone()).map_err(AppError::from)?;
        let merged = catbrowse::config::merge_config(config_file);
        let with_env = catbrowse::config::apply_env_overrides(merged);
        catbrowse::config::apply_cli_overrides(
            with_env,
            args.base_url.clone(),
            args.page_size,
            args.debounce_ms,
            args.sort,
        )
    };

    catbrowse::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let catalog = HttpCatalog::new(
        &config.base_url,
        config.request_timeout(),
        config.api_token.clone(),
    )
    .map_err(AppError::from)?;
    let service: Arc<dyn CatalogService> = Arc::new(catalog);

    let colors = ColorConfig::from_env_and_args(args.no_color);
    let initial_term = args.query.unwrap_or_default();

    catbrowse::view::run(&config, &initial_term, colors, service)?;

    info!("Exiting");
    Ok(())
}
