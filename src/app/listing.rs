//! Episode listing discovery

use url::Url;

use crate::app::client::PageFetcher;
use crate::app::extract;
use crate::app::models::EpisodePage;
use crate::errors::Result;

/// Fetch the listing page and return its episode pages in listing order
///
/// A `limit` of 0 means no limit; otherwise only the first `limit` episodes
/// are returned.
///
/// # Errors
///
/// Failing to fetch the listing page is fatal and is returned unchanged;
/// there is no fallback page. A page without episode links is not an error.
pub async fn list_episodes(
    fetcher: &dyn PageFetcher,
    start_page: &Url,
    limit: usize,
) -> Result<Vec<EpisodePage>> {
    tracing::info!("Fetching episode listing: {}", start_page);
    let html = fetcher.get_page(start_page).await?;

    let mut episodes: Vec<EpisodePage> = extract::extract_episode_links(&html, start_page)?
        .into_iter()
        .map(EpisodePage::from)
        .collect();

    tracing::info!("Found {} episodes on {}", episodes.len(), start_page);

    if limit > 0 && episodes.len() > limit {
        tracing::info!(
            "Limiting download to {} episodes (from {} total)",
            limit,
            episodes.len()
        );
        episodes.truncate(limit);
    }

    Ok(episodes)
}
