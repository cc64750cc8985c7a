//! Data structures for the work queue

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::models::{EpisodePage, WorkOutcome};

/// An episode page claimed by a worker
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Position in enqueue order, starting at 0
    pub sequence: u64,
    /// The episode page to process
    pub episode: EpisodePage,
    /// When the item was claimed
    pub claimed_at: DateTime<Utc>,
}

/// Queue counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Items ever added
    pub total_added: u64,
    /// Items handed to a worker
    pub claimed_count: u64,
    /// Items waiting to be claimed
    pub pending_count: u64,
    /// Claimed items not yet marked done
    pub in_progress_count: u64,
    /// Items whose audio file was written
    pub completed_count: u64,
    /// Items without an audio link
    pub skipped_count: u64,
    /// Items whose download failed
    pub failed_count: u64,
}

impl QueueStats {
    /// Items marked done, whatever the outcome
    pub fn done_count(&self) -> u64 {
        self.completed_count + self.skipped_count + self.failed_count
    }

    /// Nothing pending and nothing in progress
    pub fn is_finished(&self) -> bool {
        self.pending_count == 0 && self.in_progress_count == 0
    }

    pub(crate) fn record_outcome(&mut self, outcome: &WorkOutcome) {
        self.in_progress_count = self.in_progress_count.saturating_sub(1);
        match outcome {
            WorkOutcome::Downloaded(_) => self.completed_count += 1,
            WorkOutcome::Skipped => self.skipped_count += 1,
            WorkOutcome::Failed(_) => self.failed_count += 1,
        }
    }
}
