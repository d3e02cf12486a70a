//! Torrent file downloads.
//!
//! Fetches a .torrent file from the index and places it in the configured
//! downloads directory under a filesystem-safe name derived from the
//! release title, reporting progress through a caller-supplied callback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::DownloadConfig;

/// Characters replaced during filename sanitization.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Errors that can occur while downloading a torrent file.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download link is empty")]
    EmptyUrl,

    #[error("Download connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Download rejected with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Request timeout")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads .torrent files into a local directory.
pub struct TorrentDownloader {
    client: Client,
    downloads_dir: PathBuf,
}

impl TorrentDownloader {
    /// Create a downloader from configuration.
    pub fn new(config: &DownloadConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            downloads_dir: config.directory.clone(),
        }
    }

    /// Directory downloads are saved into.
    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Download `url` into the downloads directory as `<title>.torrent`.
    ///
    /// The progress callback receives `(bytes_received, content_length)`
    /// after every chunk; content length is `None` when the server does not
    /// report one.
    ///
    /// # Errors
    /// - `DownloadError::EmptyUrl` - the result had no download link
    /// - `DownloadError::ConnectionFailed` / `Timeout` - transport failure
    /// - `DownloadError::HttpStatus` - non-success response status
    /// - `DownloadError::Io` - the file could not be written
    pub async fn download<F>(
        &self,
        url: &str,
        title: &str,
        mut progress: F,
    ) -> Result<PathBuf, DownloadError>
    where
        F: FnMut(u64, Option<u64>),
    {
        if url.is_empty() {
            return Err(DownloadError::EmptyUrl);
        }

        fs::create_dir_all(&self.downloads_dir).await?;
        let path = self.downloads_dir.join(torrent_filename(title));

        debug!(url = url, path = %path.display(), "Starting torrent download");

        let mut response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::Timeout
            } else {
                DownloadError::ConnectionFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus(response.status().as_u16()));
        }

        let total = response.content_length();
        let mut file = fs::File::create(&path).await?;
        let mut received: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DownloadError::ConnectionFailed(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            received += chunk.len() as u64;
            progress(received, total);
        }
        file.flush().await?;

        debug!(path = %path.display(), bytes = received, "Torrent file saved");
        Ok(path)
    }
}

/// Replace characters that are unsafe in filenames with underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Sanitized filename for a release title, with a .torrent extension.
fn torrent_filename(title: &str) -> String {
    let name = sanitize_filename(title);
    if name.ends_with(".torrent") {
        name
    } else {
        format!("{name}.torrent")
    }
}
