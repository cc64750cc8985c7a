//! Error types for Podcast Fetcher
//!
//! Errors are grouped by component. Only listing failures are fatal to a
//! run; everything that happens inside a worker is logged and recorded as a
//! per-episode outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Download and HTTP client errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error during file operations
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned error status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Request did not complete within the client timeout
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// No usable file name could be derived from a URL
    #[error("Cannot derive a file name from URL: {url}")]
    InvalidFileName { url: String },

    /// Partial file could not be moved into place
    #[error("Could not rename {temp_path} to {final_path}")]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Generic error for other issues
    #[error("{0}")]
    Other(String),
}

/// Markup scraping errors
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// CSS selector error
    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector { selector: String },

    /// Expected element not found
    #[error("Expected element not found: {selector}")]
    ElementNotFound { selector: String },

    /// An href could not be resolved against the page URL
    #[error("Invalid link '{href}' on page {page}")]
    InvalidUrl { href: String, page: String },
}

/// Work queue and worker pool errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Worker panic or unexpected termination
    #[error("Worker {worker_id} panicked or terminated unexpectedly")]
    WorkerPanic { worker_id: u32 },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Scraping error
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// Queue error
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Download(_) => "download",
            AppError::Scrape(_) => "scraping",
            AppError::Queue(_) => "queue",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Scrape result type alias
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
