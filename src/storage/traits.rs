//! Storage traits and error types
//!
//! This module defines the trait interface for file stores and
//! associated error types.

use crate::UrlError;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur while persisting a downloaded file
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot derive storage path: {0}")]
    Path(#[from] UrlError),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for places downloaded files can be written to
pub trait FileStore {
    /// Persists the body of `link`, replacing any earlier copy
    ///
    /// # Returns
    ///
    /// The path the bytes were written to
    fn store(&self, link: &Url, bytes: &[u8]) -> StorageResult<PathBuf>;
}
