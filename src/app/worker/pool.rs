//! Worker pool management
//!
//! Spawns a fixed number of workers on the tokio runtime and waits for all
//! of them. There is no shutdown signal: each worker exits on its own when it
//! observes the queue empty, so joining every handle is the only exit path.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::WorkerConfig;
use super::core::DownloadWorkerBuilder;
use super::types::{PoolReport, WorkerProgress, WorkerSummary};
use crate::app::client::PageFetcher;
use crate::app::queue::WorkQueue;
use crate::errors::{DownloadResult, QueueError};

/// Pool for managing multiple download workers
pub struct WorkerPool {
    /// Worker configuration
    config: WorkerConfig,
    /// Shared work queue
    queue: Arc<WorkQueue>,
    /// Shared page fetcher
    fetcher: Arc<dyn PageFetcher>,
}

impl WorkerPool {
    pub fn new(config: WorkerConfig, queue: Arc<WorkQueue>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            queue,
            fetcher,
        }
    }

    /// Start all workers and wait until every one has finished
    ///
    /// Panics inside a single episode are handled by the worker. A task that
    /// still panics is logged and counted in the report; it never aborts the
    /// other workers or the run.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::ConfigurationError` if the configuration is
    /// invalid; no worker is started in that case.
    pub async fn run(
        self,
        progress_tx: Option<mpsc::Sender<WorkerProgress>>,
    ) -> DownloadResult<PoolReport> {
        self.config.validate()?;

        let worker_count = self.config.worker_count;
        info!("Starting {} workers", worker_count);
        let start = Instant::now();

        let mut handles: Vec<(u32, JoinHandle<WorkerSummary>)> = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count as u32 {
            let worker = DownloadWorkerBuilder::new()
                .id(worker_id)
                .config(self.config.clone())
                .queue(self.queue.clone())
                .fetcher(self.fetcher.clone())
                .progress_channel(progress_tx.clone())
                .build()?;

            handles.push((worker_id, tokio::spawn(worker.run())));
        }
        drop(progress_tx);

        let results = join_all(
            handles
                .into_iter()
                .map(|(worker_id, handle)| async move { (worker_id, handle.await) }),
        )
        .await;

        let mut report = PoolReport::new(worker_count);
        for (worker_id, result) in results {
            match result {
                Ok(summary) => report.absorb(&summary),
                Err(e) => {
                    warn!("{}: {}", QueueError::WorkerPanic { worker_id }, e);
                    report.panicked += 1;
                }
            }
        }

        report.elapsed = start.elapsed();
        info!(
            "parallel download with {} workers took {:.2?}",
            worker_count, report.elapsed
        );
        Ok(report)
    }
}
