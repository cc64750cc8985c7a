//! Podcast Fetcher CLI application
//!
//! Downloads Talk Python To Me and Python Bytes episodes with a pool of
//! concurrent workers.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use podcast_fetcher::cli::{handle_download, Cli};
use podcast_fetcher::config::AppConfig;
use podcast_fetcher::constants::logging;
use podcast_fetcher::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config)?;

    info!("Podcast Fetcher v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Using configuration: {:?}", config);

    handle_download(cli.download, cli.global, config).await
}

/// Initialize logging from CLI flags and the `[logging]` config table
///
/// `RUST_LOG` is honoured; the crate directive is added on top of it.
fn init_logging(cli: &Cli, config: &AppConfig) -> Result<()> {
    let log_level = cli.log_level(&config.logging.level);

    let directive = format!("{}={}", logging::LOG_TARGET, log_level)
        .parse::<Directive>()
        .map_err(|e| AppError::generic(format!("Invalid log level '{}': {}", log_level, e)))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}
