//! Command-line argument parsing for Podcast Fetcher
//!
//! The underscore spellings (`--episodes_amount`, `--podcast_name`) are
//! accepted as aliases of the kebab-case flags.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::app::models::Podcast;

/// Podcast Fetcher - download Talk Python To Me and Python Bytes episodes
#[derive(Parser, Debug)]
#[command(
    name = "podcast_fetcher",
    version,
    about = "Downloader for Talk Python To Me and Python Bytes podcasts",
    long_about = "Scrapes a podcast's episode listing, finds each episode's audio link and downloads
the audio files with a pool of concurrent workers."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to download
    #[command(flatten)]
    pub download: DownloadArgs,
}

/// Logging and configuration options
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode - errors only, no progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments selecting what to download and how
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Number of episodes to download, 0 for all
    #[arg(short = 'a', long, alias = "episodes_amount", default_value_t = 0)]
    pub episodes_amount: usize,

    /// Number of concurrent download workers [default: 1]
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Folder to store audio files in [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Podcast to download
    #[arg(short = 'n', long, alias = "podcast_name", value_enum, default_value_t = Podcast::Tptm)]
    pub podcast_name: Podcast,

    /// List the episodes that would be downloaded without downloading
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level from the flags, falling back to `configured`
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.global.quiet {
            "error"
        } else if self.global.verbose {
            "debug"
        } else {
            configured
        }
    }
}

impl DownloadArgs {
    /// Reject values clap cannot rule out on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("Number of threads must be greater than 0".to_string());
        }

        Ok(())
    }
}
