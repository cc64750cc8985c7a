//! Audio link resolution
//!
//! The listing page only links to episode pages; the audio URL has to be
//! read off each episode page's download button.

use crate::app::client::PageFetcher;
use crate::app::extract;
use crate::app::models::{AudioUrl, EpisodePage};

/// Resolve an episode page to the absolute URL of its audio file
///
/// Never fails: a fetch error, a page without the expected structure, or a
/// page without a download link are all logged and reported as `None`.
pub async fn resolve_audio_url(
    fetcher: &dyn PageFetcher,
    episode: &EpisodePage,
) -> Option<AudioUrl> {
    let html = match fetcher.get_page(episode.url()).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to fetch episode page {}: {}", episode, e);
            return None;
        }
    };

    match extract::extract_download_link(&html, episode.url()) {
        Ok(Some(url)) => Some(AudioUrl::new(url)),
        Ok(None) => {
            tracing::warn!("No download link found on {}", episode);
            None
        }
        Err(e) => {
            tracing::warn!("Could not scan {} for a download link: {}", episode, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::testing::StaticFetcher;
    use url::Url;

    const EPISODE: &str = "https://site.fm/episodes/show/42/answer";

    fn episode() -> EpisodePage {
        EpisodePage::new(Url::parse(EPISODE).unwrap())
    }

    #[tokio::test]
    async fn test_resolves_relative_download_link() {
        let html = r#"<div class="episode-buttons">
            <a href="/episodes/download/42/answer.mp3">Download</a></div>"#;
        let fetcher = StaticFetcher::new().with_page(EPISODE, html);

        let audio = resolve_audio_url(&fetcher, &episode()).await.unwrap();
        assert_eq!(
            audio.url().as_str(),
            "https://site.fm/episodes/download/42/answer.mp3"
        );
    }

    #[tokio::test]
    async fn test_missing_download_affordance_is_absent() {
        let html = r#"<div class="episode-buttons"><a href="/subscribe">Subscribe</a></div>"#;
        let fetcher = StaticFetcher::new().with_page(EPISODE, html);

        assert!(resolve_audio_url(&fetcher, &episode()).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_structure_is_absent() {
        let fetcher = StaticFetcher::new().with_page(EPISODE, "<html><body>gone</body></html>");
        assert!(resolve_audio_url(&fetcher, &episode()).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absent() {
        let fetcher = StaticFetcher::new().failing(EPISODE);
        assert!(resolve_audio_url(&fetcher, &episode()).await.is_none());
    }
}
