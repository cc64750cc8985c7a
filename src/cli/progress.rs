//! Progress display for download sessions
//!
//! An indicatif bar on stderr counts finished episodes, with one spinner
//! line per worker when worker details are enabled. The display is fed by
//! the [`WorkerProgress`] events workers send over a bounded channel; events
//! dropped because the channel was full only make the bar lag, the final
//! summary always comes from the pool report.
//!
//! Nothing is drawn in quiet mode or when stderr is not a terminal.

use std::collections::HashMap;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::models::WorkOutcome;
use crate::app::worker::{WorkerProgress, WorkerStatus};
use crate::constants::workers;
use crate::errors::{DownloadError, DownloadResult};

/// Configuration for progress display
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Enable visual progress bars
    pub enable_progress_bars: bool,
    /// Show one status line per worker
    pub show_worker_details: bool,
    /// Capacity of the worker event channel
    pub buffer_size: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_progress_bars: true,
            show_worker_details: true,
            buffer_size: workers::CHANNEL_BUFFER_SIZE,
        }
    }
}

/// Running totals shown next to the bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    downloaded: usize,
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: &WorkOutcome) {
        match outcome {
            WorkOutcome::Downloaded(_) => self.downloaded += 1,
            WorkOutcome::Skipped => self.skipped += 1,
            WorkOutcome::Failed(_) => self.failed += 1,
        }
    }

    fn message(&self) -> String {
        format!(
            "{} downloaded, {} skipped, {} failed",
            self.downloaded, self.skipped, self.failed
        )
    }
}

/// Main progress display manager
pub struct ProgressDisplay {
    config: ProgressConfig,
    is_terminal: bool,
    update_task: Option<JoinHandle<()>>,
}

impl ProgressDisplay {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            is_terminal: atty::is(atty::Stream::Stderr),
            update_task: None,
        }
    }

    /// Whether bars will actually be drawn
    pub fn is_enabled(&self) -> bool {
        self.config.enable_progress_bars && self.is_terminal
    }

    /// Draw the bars and return the sender workers should report to
    ///
    /// Returns `None` when the display is disabled.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if a bar template is invalid
    pub fn start(
        &mut self,
        total_episodes: usize,
        worker_count: usize,
    ) -> DownloadResult<Option<mpsc::Sender<WorkerProgress>>> {
        if !self.is_enabled() {
            debug!("Progress display disabled");
            return Ok(None);
        }

        let multi = MultiProgress::new();

        let main_pb = multi.add(ProgressBar::new(total_episodes as u64));
        main_pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .map_err(|e| DownloadError::Other(format!("Progress bar template error: {}", e)))?
                .progress_chars("##-"),
        );
        main_pb.set_message(Tally::default().message());

        let mut worker_bars = HashMap::new();
        if self.config.show_worker_details {
            let style = ProgressStyle::default_spinner()
                .template("  {prefix}: {spinner:.blue} {msg}")
                .map_err(|e| DownloadError::Other(format!("Worker progress template error: {}", e)))?;

            for worker_id in 0..worker_count as u32 {
                let worker_pb = multi.add(ProgressBar::new_spinner());
                worker_pb.set_style(style.clone());
                worker_pb.set_prefix(format!("{}-{}", workers::WORKER_NAME_PREFIX, worker_id));
                worker_pb.set_message(describe(&WorkerProgress::new(worker_id, WorkerStatus::Idle)));
                worker_bars.insert(worker_id, worker_pb);
            }
        }

        let (progress_tx, progress_rx) = mpsc::channel(self.config.buffer_size);
        self.update_task = Some(tokio::spawn(run_updates(progress_rx, main_pb, worker_bars)));

        Ok(Some(progress_tx))
    }

    /// Wait for the last event and finish the bars
    ///
    /// Returns once every sender has been dropped, i.e. after the pool joined.
    pub async fn finish(&mut self) {
        if let Some(task) = self.update_task.take() {
            if let Err(e) = task.await {
                debug!("Progress update task ended abnormally: {}", e);
            }
        }
    }
}

async fn run_updates(
    mut progress_rx: mpsc::Receiver<WorkerProgress>,
    main_pb: ProgressBar,
    worker_bars: HashMap<u32, ProgressBar>,
) {
    let mut tally = Tally::default();

    while let Some(progress) = progress_rx.recv().await {
        if let Some(bar) = worker_bars.get(&progress.worker_id) {
            if progress.status == WorkerStatus::Done {
                bar.finish_with_message(describe(&progress));
            } else {
                bar.set_message(describe(&progress));
            }
        }

        if let Some(outcome) = &progress.outcome {
            tally.record(outcome);
            main_pb.inc(1);
            main_pb.set_message(tally.message());
        }
    }

    main_pb.finish_with_message(tally.message());
}

/// One-line status for a worker
fn describe(progress: &WorkerProgress) -> String {
    let episode = progress.episode.as_deref().unwrap_or("");
    match progress.status {
        WorkerStatus::Idle => "starting".to_string(),
        WorkerStatus::Fetching => "looking for work".to_string(),
        WorkerStatus::Resolving => format!("resolving {}", episode),
        WorkerStatus::Downloading => format!("downloading {}", episode),
        WorkerStatus::Done => "done".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_describe_includes_episode() {
        let mut progress = WorkerProgress::new(0, WorkerStatus::Downloading);
        progress.episode = Some("https://site.fm/episodes/show/1".to_string());
        assert_eq!(
            describe(&progress),
            "downloading https://site.fm/episodes/show/1"
        );
        assert_eq!(describe(&WorkerProgress::new(0, WorkerStatus::Done)), "done");
    }

    #[test]
    fn test_tally_message() {
        let mut tally = Tally::default();
        tally.record(&WorkOutcome::Downloaded(PathBuf::from("a.mp3")));
        tally.record(&WorkOutcome::Failed("boom".to_string()));
        assert_eq!(tally.message(), "1 downloaded, 0 skipped, 1 failed");
    }

    #[tokio::test]
    async fn test_disabled_display_returns_no_sender() {
        let mut display = ProgressDisplay::new(ProgressConfig {
            enable_progress_bars: false,
            ..Default::default()
        });

        assert!(!display.is_enabled());
        assert!(display.start(10, 2).unwrap().is_none());
        display.finish().await;
    }

    #[tokio::test]
    async fn test_update_task_counts_outcomes() {
        let main_pb = ProgressBar::hidden();
        main_pb.set_length(3);
        let (tx, rx) = mpsc::channel(10);

        let task = tokio::spawn(run_updates(rx, main_pb.clone(), HashMap::new()));
        let mut done = WorkerProgress::new(0, WorkerStatus::Fetching);
        done.outcome = Some(WorkOutcome::Skipped);
        tx.send(done.clone()).await.unwrap();
        tx.send(done).await.unwrap();
        tx.send(WorkerProgress::new(0, WorkerStatus::Done)).await.unwrap();
        drop(tx);
        task.await.unwrap();

        assert_eq!(main_pb.position(), 2);
        assert!(main_pb.is_finished());
    }
}
