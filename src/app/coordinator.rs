//! Download session orchestration
//!
//! A session is two phases. Discovery fetches the listing page and fills the
//! work queue; it runs to completion before any worker starts, and a failure
//! there ends the session. The download phase then runs the worker pool
//! until the queue is drained.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;
use url::Url;

use crate::app::client::PageFetcher;
use crate::app::listing;
use crate::app::models::EpisodePage;
use crate::app::queue::WorkQueue;
use crate::app::worker::{PoolReport, WorkerConfig, WorkerPool, WorkerProgress};
use crate::errors::Result;

/// Outcome of a complete download session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// Episode pages found on the listing page, after the limit
    pub discovered: usize,
    /// What the worker pool did with them
    pub report: PoolReport,
}

impl SessionResult {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} episodes: {} downloaded, {} skipped, {} failed in {:.2?}",
            self.discovered,
            self.report.downloaded,
            self.report.skipped,
            self.report.failed,
            self.report.elapsed
        )
    }
}

/// Main coordinator for a download session
pub struct Coordinator {
    config: WorkerConfig,
    fetcher: Arc<dyn PageFetcher>,
    progress_tx: Option<mpsc::Sender<WorkerProgress>>,
}

impl Coordinator {
    pub fn new(config: WorkerConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            progress_tx: None,
        }
    }

    /// Forward worker progress events to `progress_tx`
    pub fn with_progress(mut self, progress_tx: mpsc::Sender<WorkerProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    /// Fetch the listing and return up to `limit` episode pages (0 = all)
    ///
    /// # Errors
    ///
    /// Fails if the listing page cannot be fetched or parsed.
    pub async fn discover(&self, start_page: &Url, limit: usize) -> Result<Vec<EpisodePage>> {
        listing::list_episodes(self.fetcher.as_ref(), start_page, limit).await
    }

    /// Queue `episodes` and run the worker pool until they are all processed
    pub async fn download(self, episodes: Vec<EpisodePage>) -> Result<SessionResult> {
        let queue = Arc::new(WorkQueue::new());
        let discovered = queue.add_work_bulk(episodes).await;
        info!(
            "Queued {} episodes for {} workers",
            discovered, self.config.worker_count
        );

        let report = WorkerPool::new(self.config, queue, self.fetcher)
            .run(self.progress_tx)
            .await?;

        Ok(SessionResult { discovered, report })
    }

    /// Run a whole session: discovery, then download
    ///
    /// # Errors
    ///
    /// Only discovery failures and invalid worker configuration are errors;
    /// per-episode failures are counted in the returned report.
    pub async fn run(self, start_page: &Url, limit: usize) -> Result<SessionResult> {
        self.config.validate()?;
        let episodes = self.discover(start_page, limit).await?;
        let result = self.download(episodes).await?;
        info!("Session complete: {}", result.summary());
        Ok(result)
    }
}
