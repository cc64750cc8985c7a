//! Core download worker implementation
//!
//! A worker claims episode pages from the shared queue until the queue is
//! empty. Every claimed page ends in exactly one [`WorkOutcome`], which is
//! reported back to the queue before the next claim. A panic while
//! processing a page is caught at the item boundary and recorded as a
//! failure, so the worker keeps claiming.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};

use super::config::WorkerConfig;
use super::types::{WorkerProgress, WorkerStatus, WorkerSummary};
use crate::app::client::{download_audio, PageFetcher};
use crate::app::models::{AudioUrl, EpisodePage, WorkOutcome};
use crate::app::queue::WorkQueue;
use crate::app::resolver;
use crate::constants::workers;
use crate::errors::{DownloadError, DownloadResult};

/// Individual download worker
pub struct DownloadWorker {
    /// Unique worker identifier
    id: u32,
    /// Folder that receives the audio files
    output_folder: PathBuf,
    /// Shared work queue
    queue: Arc<WorkQueue>,
    /// Shared page fetcher
    fetcher: Arc<dyn PageFetcher>,
    /// Progress reporting channel
    progress_tx: Option<mpsc::Sender<WorkerProgress>>,
    /// Outcomes recorded so far
    summary: WorkerSummary,
}

impl DownloadWorker {
    /// Worker name used in logs, `download-worker-{id}`
    pub fn name(&self) -> String {
        format!("{}-{}", workers::WORKER_NAME_PREFIX, self.id)
    }

    /// Drain the queue, returning what this worker processed
    pub async fn run(self) -> WorkerSummary {
        let span = info_span!("worker", name = %self.name());
        self.run_loop().instrument(span).await
    }

    async fn run_loop(mut self) -> WorkerSummary {
        info!("Worker {} starting", self.id);
        self.report_progress(WorkerStatus::Idle, None, None);

        loop {
            self.report_progress(WorkerStatus::Fetching, None, None);

            let work = match self.queue.get_next_work().await {
                Some(work) => work,
                None => {
                    debug!("Worker {} found the queue empty", self.id);
                    break;
                }
            };

            info!("Got link to process: {}", work.episode);
            let outcome = match AssertUnwindSafe(self.process_episode(&work.episode))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!("Processing {} panicked: {}", work.episode, message);
                    WorkOutcome::Failed(format!("panicked: {}", message))
                }
            };

            self.queue.mark_done(&work, &outcome).await;
            self.summary.record(&outcome);
            self.report_progress(WorkerStatus::Idle, Some(&work.episode), Some(outcome));
        }

        self.report_progress(WorkerStatus::Done, None, None);
        info!(
            "Worker {} done: {} downloaded, {} skipped, {} failed",
            self.id, self.summary.downloaded, self.summary.skipped, self.summary.failed
        );
        self.summary
    }

    /// Resolve and download one episode
    ///
    /// Never returns early with an error: every failure becomes an outcome.
    async fn process_episode(&self, episode: &EpisodePage) -> WorkOutcome {
        self.report_progress(WorkerStatus::Resolving, Some(episode), None);

        let audio_url = match resolver::resolve_audio_url(self.fetcher.as_ref(), episode).await {
            Some(audio_url) => audio_url,
            None => {
                warn!("No audio link for {}, skipping", episode);
                return WorkOutcome::Skipped;
            }
        };
        info!("Got audio link: {}", audio_url);

        self.report_progress(WorkerStatus::Downloading, Some(episode), None);

        match self.download(&audio_url).await {
            Ok(path) => {
                info!("Download task done: {}", path.display());
                WorkOutcome::Downloaded(path)
            }
            Err(e) => {
                warn!("Download of {} failed: {}", audio_url, e);
                WorkOutcome::Failed(e.to_string())
            }
        }
    }

    async fn download(&self, audio_url: &AudioUrl) -> DownloadResult<PathBuf> {
        let file_name = audio_url.derived_file_name()?;
        download_audio(
            self.fetcher.as_ref(),
            audio_url,
            &self.output_folder,
            Some(&file_name),
        )
        .await
    }

    /// Report progress to the monitoring system
    fn report_progress(
        &self,
        status: WorkerStatus,
        episode: Option<&EpisodePage>,
        outcome: Option<WorkOutcome>,
    ) {
        let Some(progress_tx) = &self.progress_tx else {
            return;
        };

        let mut progress = WorkerProgress::new(self.id, status);
        progress.episode = episode.map(|e| e.to_string());
        progress.outcome = outcome;

        // Send progress update (non-blocking)
        if let Err(e) = progress_tx.try_send(progress) {
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    debug!("Worker {} progress channel full, skipping update", self.id);
                }
                mpsc::error::TrySendError::Closed(_) => {
                    debug!("Worker {} progress channel closed", self.id);
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builder for creating DownloadWorker instances with validation
#[derive(Default)]
pub struct DownloadWorkerBuilder {
    id: Option<u32>,
    config: Option<WorkerConfig>,
    queue: Option<Arc<WorkQueue>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    progress_tx: Option<mpsc::Sender<WorkerProgress>>,
}

impl DownloadWorkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn config(mut self, config: WorkerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn queue(mut self, queue: Arc<WorkQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Progress events are optional; without a channel none are sent
    pub fn progress_channel(mut self, progress_tx: Option<mpsc::Sender<WorkerProgress>>) -> Self {
        self.progress_tx = progress_tx;
        self
    }

    /// Build the worker (validates all required fields are set)
    pub fn build(self) -> DownloadResult<DownloadWorker> {
        let id = self.id.ok_or_else(|| {
            DownloadError::ConfigurationError("Worker ID is required".to_string())
        })?;
        let config = self.config.unwrap_or_default();
        let queue = self.queue.ok_or_else(|| {
            DownloadError::ConfigurationError("Work queue is required".to_string())
        })?;
        let fetcher = self.fetcher.ok_or_else(|| {
            DownloadError::ConfigurationError("Page fetcher is required".to_string())
        })?;

        Ok(DownloadWorker {
            id,
            output_folder: config.output_folder,
            queue,
            fetcher,
            progress_tx: self.progress_tx,
            summary: WorkerSummary::new(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::testing::StaticFetcher;
    use tempfile::TempDir;
    use url::Url;

    const EPISODE: &str = "https://site.fm/episodes/show/7/seven";
    const AUDIO: &str = "https://cdn.site.fm/ep/7/seven.mp3";

    fn episode_html(audio: &str) -> String {
        format!(
            r#"<div class="episode-buttons"><a href="{}">Download mp3</a></div>"#,
            audio
        )
    }

    fn episode() -> EpisodePage {
        EpisodePage::new(Url::parse(EPISODE).unwrap())
    }

    fn worker(fetcher: Arc<StaticFetcher>, queue: Arc<WorkQueue>, folder: &TempDir) -> DownloadWorker {
        DownloadWorkerBuilder::new()
            .id(3)
            .config(WorkerConfig::builder().output_folder(folder.path()).build().unwrap())
            .queue(queue)
            .fetcher(fetcher)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_queue_and_fetcher() {
        let result = DownloadWorkerBuilder::new().id(0).build();
        assert!(matches!(result, Err(DownloadError::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_worker_name() {
        let temp_dir = TempDir::new().unwrap();
        let worker = worker(
            Arc::new(StaticFetcher::new()),
            Arc::new(WorkQueue::new()),
            &temp_dir,
        );
        assert_eq!(worker.name(), "download-worker-3");
    }

    #[tokio::test]
    async fn test_worker_downloads_with_derived_name() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(EPISODE, &episode_html(AUDIO))
                .with_bytes(AUDIO, b"seven"),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;

        let summary = worker(fetcher, queue.clone(), &temp_dir).run().await;

        assert_eq!(summary.downloaded, 1);
        let content = std::fs::read(temp_dir.path().join("7-seven.mp3")).unwrap();
        assert_eq!(content, b"seven");
        assert!(queue.is_finished().await);
    }

    #[tokio::test]
    async fn test_worker_skips_episode_without_audio() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new().with_page(EPISODE, r#"<div class="episode-buttons"></div>"#),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;

        let summary = worker(fetcher.clone(), queue.clone(), &temp_dir).run().await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(fetcher.requests(), vec![EPISODE.to_string()]);
        assert_eq!(queue.stats().await.skipped_count, 1);
    }

    #[tokio::test]
    async fn test_worker_survives_download_failure() {
        let temp_dir = TempDir::new().unwrap();
        let second = "https://site.fm/episodes/show/8/eight";
        let second_audio = "https://cdn.site.fm/ep/8/eight.mp3";
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(EPISODE, &episode_html(AUDIO))
                .failing(AUDIO)
                .with_page(second, &episode_html(second_audio))
                .with_bytes(second_audio, b"eight"),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;
        queue.add_work(EpisodePage::new(Url::parse(second).unwrap())).await;

        let summary = worker(fetcher, queue, &temp_dir).run().await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.downloaded, 1);
        assert!(temp_dir.path().join("8-eight.mp3").exists());
        assert!(!temp_dir.path().join("7-seven.mp3").exists());
    }

    #[tokio::test]
    async fn test_worker_keeps_claiming_after_panicking_episode() {
        let temp_dir = TempDir::new().unwrap();
        let second = "https://site.fm/episodes/show/8/eight";
        let second_audio = "https://cdn.site.fm/ep/8/eight.mp3";
        let fetcher = Arc::new(
            StaticFetcher::new()
                .panicking(EPISODE)
                .with_page(second, &episode_html(second_audio))
                .with_bytes(second_audio, b"eight"),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;
        queue.add_work(EpisodePage::new(Url::parse(second).unwrap())).await;

        let summary = worker(fetcher, queue.clone(), &temp_dir).run().await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.downloaded, 1);
        assert!(temp_dir.path().join("8-eight.mp3").exists());
        assert!(queue.is_finished().await);
        assert_eq!(queue.stats().await.failed_count, 1);
    }

    #[tokio::test]
    async fn test_worker_records_unnamed_audio_as_failed() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new().with_page(EPISODE, &episode_html("https://cdn.site.fm/ep/7/")),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;

        let summary = worker(fetcher.clone(), queue, &temp_dir).run().await;

        assert_eq!(summary.failed, 1);
        assert_eq!(fetcher.request_count("https://cdn.site.fm/ep/7/"), 0);
    }

    #[tokio::test]
    async fn test_worker_reports_progress() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(EPISODE, &episode_html(AUDIO))
                .with_bytes(AUDIO, b"seven"),
        );
        let queue = Arc::new(WorkQueue::new());
        queue.add_work(episode()).await;
        let (tx, mut rx) = mpsc::channel(100);

        let worker = DownloadWorkerBuilder::new()
            .id(0)
            .config(WorkerConfig::builder().output_folder(temp_dir.path()).build().unwrap())
            .queue(queue)
            .fetcher(fetcher)
            .progress_channel(Some(tx))
            .build()
            .unwrap();
        worker.run().await;

        let mut statuses = Vec::new();
        let mut finished = 0;
        while let Ok(progress) = rx.try_recv() {
            if progress.is_episode_finished() {
                finished += 1;
            }
            statuses.push(progress.status);
        }

        assert_eq!(finished, 1);
        assert_eq!(statuses.first(), Some(&WorkerStatus::Idle));
        let downloading = statuses
            .iter()
            .position(|s| *s == WorkerStatus::Downloading)
            .unwrap();
        assert_eq!(statuses[downloading + 1], WorkerStatus::Idle);
        assert_eq!(statuses.last(), Some(&WorkerStatus::Done));
        assert!(statuses.contains(&WorkerStatus::Resolving));
        assert!(statuses.contains(&WorkerStatus::Downloading));
    }
}
