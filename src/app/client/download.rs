//! Audio download operations
//!
//! One GET per audio URL, full body written to disk. Network failures are
//! returned to the caller untouched; deciding whether a failed download is
//! fatal belongs to the worker.

use std::path::{Path, PathBuf};

use crate::app::client::PageFetcher;
use crate::app::models::AudioUrl;
use crate::app::writer;
use crate::errors::DownloadResult;

/// Audio download handler over any page fetcher
pub struct DownloadHandler<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> DownloadHandler<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Download `audio_url` into `folder`
    ///
    /// # Arguments
    ///
    /// * `audio_url` - Resolved audio URL
    /// * `folder` - Output folder, created with all missing parents
    /// * `filename` - Name to store under; defaults to the URL's last path segment
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if no file name can be derived, the request
    /// fails, or the file cannot be written
    pub async fn download_audio(
        &self,
        audio_url: &AudioUrl,
        folder: &Path,
        filename: Option<&str>,
    ) -> DownloadResult<PathBuf> {
        let filename = match filename {
            Some(name) => name.to_string(),
            None => audio_url.file_name()?,
        };

        tracing::info!("Starting download: {}", filename);
        writer::ensure_folder(folder).await?;

        let content = self.fetcher.get_bytes(audio_url.url()).await?;
        let path = writer::save_file(folder, &filename, &content).await?;

        tracing::info!("Finished download: {} ({} bytes)", filename, content.len());
        Ok(path)
    }
}

/// Convenience wrapper around [`DownloadHandler::download_audio`]
pub async fn download_audio(
    fetcher: &dyn PageFetcher,
    audio_url: &AudioUrl,
    folder: &Path,
    filename: Option<&str>,
) -> DownloadResult<PathBuf> {
    DownloadHandler::new(fetcher)
        .download_audio(audio_url, folder, filename)
        .await
}
