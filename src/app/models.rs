//! Data models for Podcast Fetcher
//!
//! This module defines the core data structures used throughout the application:
//! the podcast selector, episode page and audio URLs, and per-episode outcomes.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::podcasts;
use crate::errors::{DownloadError, DownloadResult};

/// Podcasts with a known episode listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Podcast {
    /// Talk Python To Me
    Tptm,
    /// Python Bytes
    Bytes,
}

impl Podcast {
    /// URL of the page listing every episode
    pub fn start_page(&self) -> &'static str {
        match self {
            Self::Tptm => podcasts::TPTM_START_PAGE,
            Self::Bytes => podcasts::BYTES_START_PAGE,
        }
    }

    /// Parsed start page URL
    pub fn start_url(&self) -> DownloadResult<Url> {
        Url::parse(self.start_page()).map_err(|e| DownloadError::InvalidUrl {
            url: self.start_page().to_string(),
            error: e.to_string(),
        })
    }

    /// Human-readable podcast title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Tptm => "Talk Python To Me",
            Self::Bytes => "Python Bytes",
        }
    }
}

impl fmt::Display for Podcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tptm => write!(f, "tptm"),
            Self::Bytes => write!(f, "bytes"),
        }
    }
}

/// A page describing a single episode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EpisodePage(Url);

impl EpisodePage {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for EpisodePage {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for EpisodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direct URL of an episode's audio file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioUrl(Url);

impl AudioUrl {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Final path segment, used when no file name is given explicitly
    pub fn file_name(&self) -> DownloadResult<String> {
        let segments = self.segments();
        match segments.last() {
            Some(last) if !last.is_empty() => Ok((*last).to_string()),
            _ => Err(self.invalid_file_name()),
        }
    }

    /// File name built from the last two path segments: `{parent}-{file}`
    ///
    /// A URL whose path has a single segment uses its host as the parent,
    /// so `https://cdn.example.com/show.mp3` becomes `cdn.example.com-show.mp3`.
    pub fn derived_file_name(&self) -> DownloadResult<String> {
        let file = self.file_name()?;
        let segments = self.segments();

        let parent = if segments.len() >= 2 {
            segments[segments.len() - 2].to_string()
        } else {
            self.0.host_str().unwrap_or_default().to_string()
        };

        if parent.is_empty() {
            return Err(self.invalid_file_name());
        }

        Ok(format!("{}-{}", parent, file))
    }

    fn segments(&self) -> Vec<&str> {
        self.0
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default()
    }

    fn invalid_file_name(&self) -> DownloadError {
        DownloadError::InvalidFileName {
            url: self.0.to_string(),
        }
    }
}

impl From<Url> for AudioUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for AudioUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of processing one episode page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Audio file written to the given path
    Downloaded(PathBuf),
    /// No audio link was found on the episode page
    Skipped,
    /// Download or write failed
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(url: &str) -> AudioUrl {
        AudioUrl::new(Url::parse(url).unwrap())
    }

    #[test]
    fn test_derived_file_name_uses_last_two_segments() {
        let url = audio("https://cdn.example.com/ep/123/show.mp3");
        assert_eq!(url.derived_file_name().unwrap(), "123-show.mp3");
        assert_eq!(url.file_name().unwrap(), "show.mp3");
    }

    #[test]
    fn test_derived_file_name_ignores_query() {
        let url = audio("https://cdn.example.com/ep/42/audio.mp3?source=rss");
        assert_eq!(url.derived_file_name().unwrap(), "42-audio.mp3");
    }

    #[test]
    fn test_derived_file_name_single_segment_falls_back_to_host() {
        let url = audio("https://cdn.example.com/show.mp3");
        assert_eq!(url.derived_file_name().unwrap(), "cdn.example.com-show.mp3");
    }

    #[test]
    fn test_trailing_slash_has_no_file_name() {
        let url = audio("https://cdn.example.com/ep/123/");
        assert!(matches!(
            url.file_name(),
            Err(DownloadError::InvalidFileName { .. })
        ));
        assert!(url.derived_file_name().is_err());
    }

    #[test]
    fn test_podcast_start_pages() {
        assert_eq!(
            Podcast::Tptm.start_url().unwrap().as_str(),
            "https://talkpython.fm/episodes/all"
        );
        assert_eq!(
            Podcast::Bytes.start_url().unwrap().host_str(),
            Some("pythonbytes.fm")
        );
        assert_eq!(Podcast::Bytes.to_string(), "bytes");
    }

    #[test]
    fn test_podcast_value_enum_rejects_unknown() {
        assert_eq!(Podcast::from_str("tptm", true), Ok(Podcast::Tptm));
        assert!(Podcast::from_str("serverless", true).is_err());
    }
}
