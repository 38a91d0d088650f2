//! File downloader
//!
//! Fetches a single file link and hands the body to a [`FileStore`]. Only a
//! plain 200 response is stored; redirects are not followed and count as a
//! skip like any other status.

use crate::storage::FileStore;
use crate::url::is_http_scheme;
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use url::Url;

/// Result of downloading one file link
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The body was written to disk
    Stored {
        /// Where the file was written
        path: PathBuf,
        /// Number of bytes written
        bytes: usize,
    },

    /// Nothing was written
    Skipped {
        /// Why the link was skipped
        reason: String,
    },
}

impl DownloadOutcome {
    /// Returns true if the file was stored
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }

    fn skipped(link: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!("Error getting file at {}: {}", link, reason);
        Self::Skipped { reason }
    }
}

/// Downloads one file link into `store`
///
/// `client` is expected to have redirect following disabled. Every failure
/// (unparseable link, transport error, non-200 status, body read error,
/// filesystem error) is logged and returned as `Skipped`.
pub async fn download_file<S>(client: &Client, store: &S, link: &str) -> DownloadOutcome
where
    S: FileStore + ?Sized,
{
    let url = match Url::parse(link) {
        Ok(url) if is_http_scheme(&url) => url,
        Ok(url) => {
            return DownloadOutcome::skipped(link, format!("unsupported scheme '{}'", url.scheme()))
        }
        Err(e) => return DownloadOutcome::skipped(link, format!("invalid URL: {}", e)),
    };

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return DownloadOutcome::skipped(link, e.to_string()),
    };

    let status = response.status();
    tracing::debug!("Response for {}: HTTP {}", link, status.as_u16());

    if status != StatusCode::OK {
        return DownloadOutcome::skipped(link, format!("bad response HTTP {}", status.as_u16()));
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return DownloadOutcome::skipped(link, format!("failed to read body: {}", e)),
    };

    match store.store(&url, &body) {
        Ok(path) => {
            tracing::info!("Writing: {} ({} bytes)", path.display(), body.len());
            DownloadOutcome::Stored {
                path,
                bytes: body.len(),
            }
        }
        Err(e) => DownloadOutcome::skipped(link, e.to_string()),
    }
}
