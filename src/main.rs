//! Scambo explore page - Entry Point

use clap::Parser;
use scambo::config::{CliOverrides, Theme};
use scambo::model::AppError;
use scambo::provider::{FaultyProvider, MockCatalog, ResultProvider};
use scambo::state::SearchSettings;
use scambo::view::LaunchOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Scambo - browse barter posts from the terminal
#[derive(Parser, Debug)]
#[command(name = "scambo")]
#[command(version)]
#[command(about = "Explore Scambo barter posts: debounced search, category filters and paging")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Colour theme
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Quiet period before a typed query runs, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Simulated provider latency, in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Start with this search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Start with this category selected
    #[arg(short, long)]
    pub category: Option<String>,

    /// Fail every N-th fetch (0 disables)
    #[arg(long)]
    pub simulate_failures: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            theme: self.theme,
            page_size: self.page_size,
            debounce_ms: self.debounce_ms,
            latency_ms: self.latency_ms,
            simulate_failures: self.simulate_failures,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = scambo::config::resolve(args.config.clone(), &args.overrides())?;

    scambo::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let today = chrono::Local::now().date_naive();
    let catalog = MockCatalog::seeded(today)?;
    info!(posts = catalog.len(), "Catalog loaded");

    let provider: Arc<dyn ResultProvider> = match config.simulate_failures {
        Some(every) => Arc::new(FaultyProvider::new(catalog, every)),
        None => Arc::new(catalog),
    };

    let options = LaunchOptions {
        settings: SearchSettings {
            page_size: config.page_size,
            debounce: Duration::from_millis(config.debounce_ms),
        },
        theme: config.theme,
        no_color: args.no_color,
        latency: Duration::from_millis(config.latency_ms),
        query: args.query,
        category: args.category,
        today,
    };

    scambo::view::run_with_provider(provider, options)?;

    Ok(())
}
