//! In-memory page fetcher for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::PageFetcher;
use crate::errors::{DownloadError, DownloadResult};

/// Serves canned pages and bytes; URLs marked as failing return a
/// simulated network error and URLs marked as panicking panic the caller
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    bytes: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_bytes(mut self, url: &str, content: &[u8]) -> Self {
        self.bytes.insert(url.to_string(), content.to_vec());
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panicking.insert(url.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every URL requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    async fn begin(&self, url: &Url) -> DownloadResult<()> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panicking.contains(url.as_str()) {
            panic!("simulated panic for {}", url);
        }
        if self.failing.contains(url.as_str()) {
            return Err(DownloadError::Other(format!(
                "simulated network failure for {}",
                url
            )));
        }
        Ok(())
    }

    fn not_found(url: &Url) -> DownloadError {
        DownloadError::ServerError {
            status: 404,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn get_page(&self, url: &Url) -> DownloadResult<String> {
        self.begin(url).await?;
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }

    async fn get_bytes(&self, url: &Url) -> DownloadResult<Vec<u8>> {
        self.begin(url).await?;
        self.bytes
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }
}
