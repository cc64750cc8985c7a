//! Command-line interface components
//!
//! Argument parsing, the download command handler and the progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, DownloadArgs, GlobalArgs};
pub use commands::handle_download;
pub use progress::{ProgressConfig, ProgressDisplay};
