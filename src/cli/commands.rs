//! Command handlers for the CLI
//!
//! Glue between parsed arguments, the loaded configuration and the
//! download coordinator. Only a failure to list episodes (or bad
//! configuration) is returned as an error; per-episode failures end up in
//! the printed summary.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::{DownloadArgs, GlobalArgs};
use super::progress::{ProgressConfig, ProgressDisplay};
use crate::app::client::{PageFetcher, PodcastClient};
use crate::app::coordinator::{Coordinator, SessionResult};
use crate::app::models::EpisodePage;
use crate::app::worker::WorkerConfig;
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Handle the download command
///
/// Lists the selected podcast's episodes, then downloads them with the
/// configured number of workers. With `--dry-run` the episodes are printed
/// and nothing is downloaded.
pub async fn handle_download(args: DownloadArgs, global: GlobalArgs, config: AppConfig) -> Result<()> {
    let (client_config, _) = config.to_runtime_config();
    let worker_config = worker_config_from(&args, &config)?;

    let podcast = args.podcast_name;
    let start_page = podcast.start_url()?;
    info!(
        "Downloading {} into {} with {} workers",
        podcast.title(),
        worker_config.output_folder.display(),
        worker_config.worker_count
    );

    let fetcher: Arc<dyn PageFetcher> = Arc::new(PodcastClient::with_config(&client_config)?);
    let coordinator = Coordinator::new(worker_config.clone(), fetcher);

    let episodes = coordinator
        .discover(&start_page, args.episodes_amount)
        .await?;

    if args.dry_run {
        print_dry_run(&episodes);
        return Ok(());
    }

    if episodes.is_empty() {
        println!("No episodes found on {}", start_page);
        return Ok(());
    }

    let mut progress_display = ProgressDisplay::new(ProgressConfig {
        enable_progress_bars: !global.quiet,
        show_worker_details: worker_config.worker_count > 1,
        buffer_size: worker_config.progress_buffer_size,
    });

    let coordinator = match progress_display.start(episodes.len(), worker_config.worker_count)? {
        Some(progress_tx) => coordinator.with_progress(progress_tx),
        None => coordinator,
    };

    let result = coordinator.download(episodes).await;
    progress_display.finish().await;
    let result = result?;

    if !global.quiet {
        print_summary(&result, &worker_config.output_folder);
    }

    Ok(())
}

/// Worker settings from the config file with command-line overrides applied
fn worker_config_from(args: &DownloadArgs, config: &AppConfig) -> Result<WorkerConfig> {
    args.validate().map_err(AppError::generic)?;

    let (_, mut worker_config) = config.to_runtime_config();
    if let Some(threads) = args.threads {
        worker_config.worker_count = threads;
    }
    if let Some(folder) = &args.folder {
        worker_config.output_folder = folder.clone();
    }

    worker_config.validate()?;
    Ok(worker_config)
}

fn print_dry_run(episodes: &[EpisodePage]) {
    println!("Dry run - would download {} episodes:", episodes.len());
    for (i, episode) in episodes.iter().enumerate() {
        println!("  {}. {}", i + 1, episode);
    }
}

fn print_summary(result: &SessionResult, folder: &Path) {
    let report = &result.report;
    println!();
    println!("Download summary");
    println!("  Episodes found: {}", result.discovered);
    println!("  Downloaded:     {}", report.downloaded);
    println!("  Skipped:        {}", report.skipped);
    println!("  Failed:         {}", report.failed);
    println!("  Workers:        {}", report.workers);
    println!("  Elapsed:        {:.2?}", report.elapsed);
    println!("  Folder:         {}", folder.display());

    if report.panicked > 0 {
        println!("  {} worker(s) stopped unexpectedly, see log", report.panicked);
    }
}
