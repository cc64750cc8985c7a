//! Worker type definitions
//!
//! Progress events sent by workers, the per-worker summary returned when a
//! worker finishes, and the pool-wide report built from those summaries.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::app::models::WorkOutcome;

/// Current status of a download worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerStatus {
    /// Started, no work claimed yet
    Idle,
    /// Claiming the next episode page from the queue
    Fetching,
    /// Looking up the audio link on an episode page
    Resolving,
    /// Downloading and writing an audio file
    Downloading,
    /// Queue observed empty, worker has exited its loop
    Done,
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Resolving => "resolving",
            Self::Downloading => "downloading",
            Self::Done => "done",
        };
        f.write_str(text)
    }
}

/// Progress information from a download worker
#[derive(Debug, Clone)]
pub struct WorkerProgress {
    /// ID of the worker reporting progress
    pub worker_id: u32,
    /// Current worker status
    pub status: WorkerStatus,
    /// Episode page currently being processed
    pub episode: Option<String>,
    /// Set once an episode has been processed
    pub outcome: Option<WorkOutcome>,
    /// Timestamp of this progress report
    pub timestamp: DateTime<Utc>,
}

impl WorkerProgress {
    pub fn new(worker_id: u32, status: WorkerStatus) -> Self {
        Self {
            worker_id,
            status,
            episode: None,
            outcome: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether this event marks the end of one episode
    pub fn is_episode_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Counts of what a single worker processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: u32,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl WorkerSummary {
    pub fn new(worker_id: u32) -> Self {
        Self {
            worker_id,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &WorkOutcome) {
        match outcome {
            WorkOutcome::Downloaded(_) => self.downloaded += 1,
            WorkOutcome::Skipped => self.skipped += 1,
            WorkOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

/// Aggregate result of a pool run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Number of workers started
    pub workers: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Workers whose task panicked instead of returning a summary
    pub panicked: usize,
    /// Wall-clock time from spawning the first worker to joining the last
    pub elapsed: Duration,
}

impl PoolReport {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub fn absorb(&mut self, summary: &WorkerSummary) {
        self.downloaded += summary.downloaded;
        self.skipped += summary.skipped;
        self.failed += summary.failed;
    }

    pub fn processed(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}
