//! Core application logic for Podcast Fetcher
//!
//! The pipeline, leaf to root:
//!
//! - [`extract`] reads episode and download links out of page markup
//! - [`client`] fetches pages and bytes behind the [`PageFetcher`] trait
//! - [`listing`] turns the start page into episode pages
//! - [`resolver`] turns an episode page into its audio URL
//! - [`writer`] stores downloaded bytes on disk
//! - [`queue`] holds the episode pages waiting for a worker
//! - [`worker`] runs the pool that drains the queue
//! - [`coordinator`] ties listing and the pool into one session
//!
//! # Examples
//!
//! ```rust,no_run
//! use podcast_fetcher::app::{listing, resolver, PodcastClient};
//! use podcast_fetcher::app::models::Podcast;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PodcastClient::new()?;
//! let episodes = listing::list_episodes(&client, &Podcast::Tptm.start_url()?, 3).await?;
//!
//! for episode in &episodes {
//!     if let Some(audio) = resolver::resolve_audio_url(&client, episode).await {
//!         println!("{} -> {}", episode, audio);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coordinator;
pub mod extract;
pub mod listing;
pub mod models;
pub mod queue;
pub mod resolver;
pub mod worker;
pub mod writer;

// Re-export main public API
pub use client::{ClientConfig, PageFetcher, PodcastClient};
pub use coordinator::{Coordinator, SessionResult};
pub use models::{AudioUrl, EpisodePage, Podcast, WorkOutcome};
pub use queue::{QueueStats, WorkItem, WorkQueue};
pub use worker::{PoolReport, WorkerConfig, WorkerPool, WorkerProgress, WorkerStatus};
