//! Application constants for Podcast Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Podcast start pages
pub mod podcasts {
    /// Episode listing for Talk Python To Me
    pub const TPTM_START_PAGE: &str = "https://talkpython.fm/episodes/all";

    /// Episode listing for Python Bytes
    pub const BYTES_START_PAGE: &str = "https://pythonbytes.fm/episodes/all";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("podcast-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// CSS selectors for the episode listing and episode pages
pub mod selectors {
    /// Rows of the episode listing table
    pub const EPISODE_ROW_SELECTOR: &str = "table.episodes tr";

    /// Link inside a listing row
    pub const EPISODE_LINK_SELECTOR: &str = "a[href]";

    /// Button container on an episode page
    pub const EPISODE_BUTTONS_SELECTOR: &str = "div.episode-buttons";

    /// Anchors inside the button container
    pub const BUTTON_LINK_SELECTOR: &str = "a";

    /// Text that labels the download affordance (matched case-insensitively)
    pub const DOWNLOAD_LABEL: &str = "download";
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of download workers
    pub const DEFAULT_WORKER_COUNT: usize = 1;

    /// Maximum accepted worker count
    pub const MAX_WORKER_COUNT: usize = 64;

    /// Channel buffer size for worker progress reporting
    pub const CHANNEL_BUFFER_SIZE: usize = 100;

    /// Prefix for worker names
    pub const WORKER_NAME_PREFIX: &str = "download-worker";
}

/// File operation constants
pub mod files {
    /// Suffix for in-flight writes, renamed into place on completion
    pub const PARTIAL_FILE_SUFFIX: &str = ".part";

    /// Default output folder
    pub const DEFAULT_OUTPUT_FOLDER: &str = ".";

    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "podcast-fetcher.toml";

    /// Directory name under the user config dir
    pub const CONFIG_DIR_NAME: &str = "podcast-fetcher";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Crate target used in the log filter directive
    pub const LOG_TARGET: &str = "podcast_fetcher";
}

// Re-export commonly used constants for convenience
pub use http::USER_AGENT;
pub use podcasts::{BYTES_START_PAGE, TPTM_START_PAGE};
pub use workers::DEFAULT_WORKER_COUNT;
