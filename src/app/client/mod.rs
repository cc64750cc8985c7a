//! HTTP client for podcast sites
//!
//! The rest of the application talks to the network only through the
//! [`PageFetcher`] trait, so workers and resolvers can be driven by the real
//! reqwest-backed [`PodcastClient`] or by an in-memory fetcher in tests.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: GET requests with status checking
//! - `download`: audio download to disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use crate::app::models::AudioUrl;
use crate::errors::DownloadResult;

pub mod config;
pub mod download;
pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use download::{download_audio, DownloadHandler};

use http::HttpHandler;

/// Source of raw page markup and file bytes
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as text
    async fn get_page(&self, url: &Url) -> DownloadResult<String>;

    /// Fetch the body of `url` as raw bytes
    async fn get_bytes(&self, url: &Url) -> DownloadResult<Vec<u8>>;
}

/// reqwest-backed client for podcast sites
///
/// A single client is shared read-only by every worker; reqwest pools
/// connections internally.
#[derive(Debug, Clone)]
pub struct PodcastClient {
    http_handler: HttpHandler,
}

impl PodcastClient {
    /// Creates a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the HTTP client cannot be built
    pub fn new() -> DownloadResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    pub fn with_config(config: &ClientConfig) -> DownloadResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!("Created podcast client (timeout {:?})", config.request_timeout);

        Ok(Self {
            http_handler: HttpHandler::new(client),
        })
    }

    /// Downloads an audio file into `folder`
    ///
    /// See [`DownloadHandler::download_audio`].
    pub async fn download_audio(
        &self,
        audio_url: &AudioUrl,
        folder: &Path,
        filename: Option<&str>,
    ) -> DownloadResult<PathBuf> {
        DownloadHandler::new(self)
            .download_audio(audio_url, folder, filename)
            .await
    }
}

#[async_trait]
impl PageFetcher for PodcastClient {
    async fn get_page(&self, url: &Url) -> DownloadResult<String> {
        self.http_handler.get_page(url).await
    }

    async fn get_bytes(&self, url: &Url) -> DownloadResult<Vec<u8>> {
        self.http_handler.get_bytes(url).await
    }
}
