//! Work queue of episode pages shared by the download workers
//!
//! All episode pages are loaded before the workers start. Each worker then
//! claims items with [`WorkQueue::get_next_work`], which pops under the
//! queue lock, so an item is handed to exactly one worker and an empty
//! result means there is nothing left for anyone.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use podcast_fetcher::app::models::{EpisodePage, WorkOutcome};
//! use podcast_fetcher::app::queue::WorkQueue;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = WorkQueue::new();
//! queue
//!     .add_work(EpisodePage::new(Url::parse("https://talkpython.fm/episodes/show/1")?))
//!     .await;
//!
//! while let Some(work) = queue.get_next_work().await {
//!     // resolve and download...
//!     queue.mark_done(&work, &WorkOutcome::Skipped).await;
//! }
//! assert!(queue.is_finished().await);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod types;

pub use core::WorkQueue;
pub use types::{QueueStats, WorkItem};
