//! Prelude module for Podcast Fetcher Library
//!
//! Re-exports the items needed to run a download session with a single
//! `use podcast_fetcher::prelude::*;`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use podcast_fetcher::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher: Arc<dyn PageFetcher> = Arc::new(PodcastClient::new()?);
//!     let config = WorkerConfig::builder().worker_count(4).build()?;
//!
//!     let start_page = Podcast::Bytes.start_url()?;
//!     let result = Coordinator::new(config, fetcher).run(&start_page, 10).await?;
//!     println!("{}", result.summary());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Components used in most integrations
pub use crate::app::{
    ClientConfig, Coordinator, PageFetcher, PodcastClient, SessionResult, WorkQueue, WorkerConfig,
    WorkerPool,
};

// Data models
pub use crate::app::models::{AudioUrl, EpisodePage, Podcast, WorkOutcome};
