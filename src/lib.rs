//! Podcast Fetcher Library
//!
//! Scrapes the episode listing of Talk Python To Me or Python Bytes, resolves
//! each episode page to its audio file and downloads the files with a pool
//! of concurrent workers sharing one work queue.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
