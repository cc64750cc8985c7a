//! Download worker pool
//!
//! A fixed number of workers drain a shared [`WorkQueue`](crate::app::queue::WorkQueue)
//! of episode pages. Each worker resolves the page to its audio link,
//! downloads the audio file and records the outcome, then claims the next
//! page. A worker stops only when it finds the queue empty.
//!
//! Nothing that happens to a single episode can end a worker early: a page
//! without an audio link is skipped and a failed download is logged and
//! counted, so the pool keeps its full size until the queue is drained.
//!
//! # Module Organization
//!
//! - [`config`] - Worker count and output folder, with validation
//! - [`types`] - Progress events, worker status and summaries
//! - [`core`] - The per-worker loop
//! - [`pool`] - Spawning and joining the workers
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use podcast_fetcher::app::client::{PageFetcher, PodcastClient};
//! use podcast_fetcher::app::queue::WorkQueue;
//! use podcast_fetcher::app::worker::{WorkerConfig, WorkerPool};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher: Arc<dyn PageFetcher> = Arc::new(PodcastClient::new()?);
//! let queue = Arc::new(WorkQueue::new());
//! // queue.add_work_bulk(episodes).await;
//!
//! let config = WorkerConfig::builder().worker_count(4).output_folder("episodes").build()?;
//! let report = WorkerPool::new(config, queue, fetcher).run(None).await?;
//! println!("{} downloaded in {:?}", report.downloaded, report.elapsed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod pool;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{WorkerConfig, WorkerConfigBuilder};
pub use core::{DownloadWorker, DownloadWorkerBuilder};
pub use pool::WorkerPool;
pub use types::{PoolReport, WorkerProgress, WorkerStatus, WorkerSummary};
