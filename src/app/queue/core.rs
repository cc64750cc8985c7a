//! Core work queue implementation

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use super::types::{QueueStats, WorkItem};
use crate::app::models::{EpisodePage, WorkOutcome};

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<(u64, EpisodePage)>,
    next_sequence: u64,
    stats: QueueStats,
}

/// FIFO of episode pages shared by all workers
#[derive(Debug, Default)]
pub struct WorkQueue {
    state: Mutex<QueueState>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an episode page, returning its sequence number
    pub async fn add_work(&self, episode: EpisodePage) -> u64 {
        let mut state = self.state.lock().await;
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.pending.push_back((sequence, episode));
        state.stats.total_added += 1;
        state.stats.pending_count += 1;
        sequence
    }

    /// Append episode pages in order under a single lock
    pub async fn add_work_bulk(&self, episodes: Vec<EpisodePage>) -> usize {
        let mut state = self.state.lock().await;
        let count = episodes.len();

        for episode in episodes {
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            state.pending.push_back((sequence, episode));
        }

        state.stats.total_added += count as u64;
        state.stats.pending_count += count as u64;
        debug!("Queued {} episode pages", count);
        count
    }

    /// Claim the oldest pending item
    ///
    /// Returns `None` once the queue is empty. The check and the pop happen
    /// under one lock, so two workers can never take the same item.
    pub async fn get_next_work(&self) -> Option<WorkItem> {
        let lock_start = Instant::now();
        let mut state = self.state.lock().await;

        let lock_duration = lock_start.elapsed();
        if lock_duration > Duration::from_millis(10) {
            debug!("Queue lock contention detected: {:?} wait time", lock_duration);
        }

        let (sequence, episode) = state.pending.pop_front()?;
        state.stats.pending_count -= 1;
        state.stats.claimed_count += 1;
        state.stats.in_progress_count += 1;

        Some(WorkItem {
            sequence,
            episode,
            claimed_at: Utc::now(),
        })
    }

    /// Record the outcome of a claimed item
    pub async fn mark_done(&self, work: &WorkItem, outcome: &WorkOutcome) {
        let mut state = self.state.lock().await;
        state.stats.record_outcome(outcome);
        debug!(
            "Work {} done after {}ms: {:?}",
            work.sequence,
            (Utc::now() - work.claimed_at).num_milliseconds(),
            outcome
        );
    }

    /// Number of items waiting to be claimed
    pub async fn pending_count(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.pending.is_empty()
    }

    /// Every claimed item has been marked done and nothing is pending
    pub async fn is_finished(&self) -> bool {
        self.state.lock().await.stats.is_finished()
    }

    /// Snapshot of the queue counters
    pub async fn stats(&self) -> QueueStats {
        self.state.lock().await.stats.clone()
    }
}
