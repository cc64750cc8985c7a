//! Link extraction from episode listing and episode pages
//!
//! Pure functions over raw markup. Relative links are resolved against the
//! URL of the page they were found on.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::constants::selectors;
use crate::errors::{ScrapeError, ScrapeResult};

fn parse_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
    })
}

fn resolve_href(page: &Url, href: &str) -> ScrapeResult<Url> {
    page.join(href.trim()).map_err(|_| ScrapeError::InvalidUrl {
        href: href.to_string(),
        page: page.to_string(),
    })
}

/// Extract episode page links from the episode listing, in document order
///
/// Each row of the listing table contributes its first link. Rows without a
/// link (headers) are skipped, as are hrefs that cannot be resolved. A page
/// without a listing table yields an empty vector.
pub fn extract_episode_links(html: &str, page: &Url) -> ScrapeResult<Vec<Url>> {
    let row_selector = parse_selector(selectors::EPISODE_ROW_SELECTOR)?;
    let link_selector = parse_selector(selectors::EPISODE_LINK_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for row in document.select(&row_selector) {
        let Some(href) = row
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            continue;
        };

        match resolve_href(page, href) {
            Ok(url) => links.push(url),
            Err(e) => tracing::debug!("Skipping episode link: {}", e),
        }
    }

    tracing::debug!("Extracted {} episode links from {}", links.len(), page);
    Ok(links)
}

/// Extract the download link from an episode page
///
/// Looks for the first anchor in the episode button bar whose text mentions
/// "download". Returns `Ok(None)` when the bar exists but has no such
/// anchor.
///
/// # Errors
///
/// Returns `ScrapeError::ElementNotFound` if the page has no button bar and
/// `ScrapeError::InvalidUrl` if the matching href cannot be resolved.
pub fn extract_download_link(html: &str, page: &Url) -> ScrapeResult<Option<Url>> {
    let buttons_selector = parse_selector(selectors::EPISODE_BUTTONS_SELECTOR)?;
    let anchor_selector = parse_selector(selectors::BUTTON_LINK_SELECTOR)?;

    let document = Html::parse_document(html);
    let buttons = document
        .select(&buttons_selector)
        .next()
        .ok_or_else(|| ScrapeError::ElementNotFound {
            selector: selectors::EPISODE_BUTTONS_SELECTOR.to_string(),
        })?;

    let download = buttons
        .select(&anchor_selector)
        .find(|anchor| is_download_anchor(anchor));

    match download.and_then(|anchor| anchor.value().attr("href")) {
        Some(href) => resolve_href(page, href).map(Some),
        None => Ok(None),
    }
}

fn is_download_anchor(anchor: &ElementRef<'_>) -> bool {
    anchor
        .text()
        .collect::<String>()
        .to_lowercase()
        .contains(selectors::DOWNLOAD_LABEL)
}
