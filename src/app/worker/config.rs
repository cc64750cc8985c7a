//! Worker configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{files, workers};
use crate::errors::{DownloadError, DownloadResult};

/// Configuration for the download workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of concurrent workers to spawn
    pub worker_count: usize,
    /// Folder that receives the audio files
    pub output_folder: PathBuf,
    /// Channel buffer size for progress reporting
    pub progress_buffer_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
            output_folder: PathBuf::from(files::DEFAULT_OUTPUT_FOLDER),
            progress_buffer_size: workers::CHANNEL_BUFFER_SIZE,
        }
    }
}

impl WorkerConfig {
    pub fn builder() -> WorkerConfigBuilder {
        WorkerConfigBuilder::new()
    }

    /// Validate configuration values and return errors for invalid settings
    pub fn validate(&self) -> DownloadResult<()> {
        if self.worker_count == 0 {
            return Err(DownloadError::ConfigurationError(
                "Worker count cannot be zero".to_string(),
            ));
        }

        if self.worker_count > workers::MAX_WORKER_COUNT {
            return Err(DownloadError::ConfigurationError(format!(
                "Worker count ({}) exceeds maximum ({})",
                self.worker_count,
                workers::MAX_WORKER_COUNT
            )));
        }

        if self.progress_buffer_size == 0 {
            return Err(DownloadError::ConfigurationError(
                "Progress buffer size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for WorkerConfig
#[derive(Debug, Default)]
pub struct WorkerConfigBuilder {
    config: WorkerConfig,
}

impl WorkerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worker_count(mut self, count: usize) -> Self {
        self.config.worker_count = count;
        self
    }

    pub fn output_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.output_folder = folder.into();
        self
    }

    pub fn progress_buffer_size(mut self, size: usize) -> Self {
        self.config.progress_buffer_size = size;
        self
    }

    /// Build the configuration, validating it first
    pub fn build(self) -> DownloadResult<WorkerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
