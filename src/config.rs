//! Configuration management for Podcast Fetcher
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! an optional TOML file, and command-line flags. The file is looked up in
//! this order:
//!
//! 1. the path given with `--config` (an error if it does not exist)
//! 2. `./podcast-fetcher.toml`
//! 3. `<user config dir>/podcast-fetcher/config.toml`
//!
//! Every table and key is optional, so a file only needs the values it
//! changes:
//!
//! ```toml
//! [client]
//! request_timeout_secs = 120
//!
//! [worker]
//! worker_count = 4
//! output_folder = "/srv/podcasts"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{ClientConfig, WorkerConfig};
use crate::constants::{files, http, logging, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Log levels accepted in the `[logging]` table
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Download worker settings
    pub worker: WorkerConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// User agent sent with every request
    pub user_agent: String,
    /// TCP keep-alive timeout in seconds (None = disabled)
    pub tcp_keepalive_secs: Option<u64>,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
    /// Whole-request timeout in seconds, including the audio body (None = no timeout)
    pub request_timeout_secs: Option<u64>,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            tcp_keepalive_secs: Some(30),
            tcp_nodelay: true,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            request_timeout_secs: None,
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
        }
    }
}

/// TOML-friendly worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfigToml {
    /// Number of concurrent workers to spawn
    pub worker_count: usize,
    /// Folder that receives the audio files
    pub output_folder: PathBuf,
    /// Channel buffer size for progress reporting
    pub progress_buffer_size: usize,
}

impl Default for WorkerConfigToml {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
            output_folder: PathBuf::from(files::DEFAULT_OUTPUT_FOLDER),
            progress_buffer_size: workers::CHANNEL_BUFFER_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Convert TOML-friendly configuration to runtime configuration
    pub fn to_runtime_config(&self) -> (ClientConfig, WorkerConfig) {
        (
            self.client.to_runtime_config(),
            self.worker.to_runtime_config(),
        )
    }

    /// Load configuration from the first file found in the search order
    ///
    /// Without any file the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if `config_file_override` does not
    /// exist, and a read, parse or validation error for a bad file.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => return Err(ConfigError::NotFound { path }),
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(files::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::user_config_path() {
            search_paths.push(path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        if let Some(path) = &found {
            debug!("Found config file: {}", path.display());
        }
        found
    }

    /// Per-user config file path, if the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load and validate configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;

        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker.worker_count == 0 || self.worker.worker_count > workers::MAX_WORKER_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "worker.worker_count".to_string(),
                value: self.worker.worker_count.to_string(),
                reason: format!("Must be between 1 and {}", workers::MAX_WORKER_COUNT),
            });
        }

        if self.client.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "client.request_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than zero; omit the key to disable it".to_string(),
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Expected one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            user_agent: self.user_agent.clone(),
            tcp_keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.pool_max_per_host,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl WorkerConfigToml {
    /// Convert to runtime WorkerConfig
    pub fn to_runtime_config(&self) -> WorkerConfig {
        WorkerConfig {
            worker_count: self.worker_count,
            output_folder: self.output_folder.clone(),
            progress_buffer_size: self.progress_buffer_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let (client, worker) = config.to_runtime_config();
        assert_eq!(client.request_timeout, None);
        assert_eq!(worker.worker_count, 1);
        assert_eq!(worker.output_folder, PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[worker]\nworker_count = 4\n").await;

        let config = AppConfig::load(Some(path)).await.unwrap();
        assert_eq!(config.worker.worker_count, 4);
        assert_eq!(config.worker.output_folder, PathBuf::from("."));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.client.request_timeout_secs, None);
    }

    #[tokio::test]
    async fn test_full_file_round_trips_to_runtime() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[client]
user_agent = "test-agent"
request_timeout_secs = 5
connect_timeout_secs = 2

[worker]
worker_count = 3
output_folder = "episodes"

[logging]
level = "debug"
"#,
        )
        .await;

        let config = AppConfig::load(Some(path)).await.unwrap();
        let (client, worker) = config.to_runtime_config();
        assert_eq!(client.user_agent, "test-agent");
        assert_eq!(client.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.connect_timeout, Duration::from_secs(2));
        assert_eq!(worker.worker_count, 3);
        assert_eq!(worker.output_folder, PathBuf::from("episodes"));
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = AppConfig::load(Some(missing.clone())).await;
        assert!(matches!(result, Err(ConfigError::NotFound { path }) if path == missing));
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[worker\nworker_count = ").await;

        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[worker]\nworker_count = 0\n").await;
        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == "worker.worker_count"));

        let path = write_config(&dir, "[client]\nrequest_timeout_secs = 0\n").await;
        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == "client.request_timeout_secs"));

        let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n").await;
        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == "logging.level"));
    }

    #[test]
    fn test_user_config_path_layout() {
        if let Some(path) = AppConfig::user_config_path() {
            assert!(path.ends_with("podcast-fetcher/config.toml"));
        }
    }
}
