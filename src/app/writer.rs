//! File writer for downloaded audio
//!
//! Writes land in a `.part` file next to the destination and are renamed
//! into place once the full body is on disk, so a finished file name never
//! points at a truncated download. Each write gets its own `.part` name, so
//! two workers saving under the same destination never share a temp file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::constants::files;
use crate::errors::{DownloadError, DownloadResult};

/// Distinguishes concurrent writes to the same destination
static WRITE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Save `content` as `folder/filename`, creating `folder` if needed
///
/// Creating an existing folder is a no-op and an existing file is
/// overwritten.
pub async fn save_file(folder: &Path, filename: &str, content: &[u8]) -> DownloadResult<PathBuf> {
    ensure_folder(folder).await?;

    let destination = folder.join(filename);
    let temp_path = partial_path(&destination, WRITE_SEQUENCE.fetch_add(1, Ordering::Relaxed));

    if let Err(e) = write_partial(&temp_path, content).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if tokio::fs::rename(&temp_path, &destination).await.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(DownloadError::AtomicOperationFailed {
            temp_path,
            final_path: destination,
        });
    }

    tracing::debug!("Wrote {} bytes to {}", content.len(), destination.display());
    Ok(destination)
}

/// Create `folder` and any missing parents
pub async fn ensure_folder(folder: &Path) -> DownloadResult<()> {
    if !folder.exists() {
        tracing::info!("Making directory: {}", folder.display());
    }
    tokio::fs::create_dir_all(folder).await?;
    Ok(())
}

async fn write_partial(temp_path: &Path, content: &[u8]) -> DownloadResult<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(content).await?;
    file.flush().await?;
    Ok(())
}

/// `{name}.{sequence}.part` next to `destination`
fn partial_path(destination: &Path, sequence: u64) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}{}", sequence, files::PARTIAL_FILE_SUFFIX));
    destination.with_file_name(name)
}
