//! Bucket-Trawler: a paginated listing crawler for object-storage files
//!
//! This crate walks a paginated search-results listing page by page, pulls the
//! file links out of each page's results table and saves every linked file under
//! a directory named after the file's host.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Bucket-Trawler operations
///
/// Expected failures during a crawl (bad responses, odd markup, failed writes)
/// are reported through typed outcomes instead; this type only covers the
/// conditions that prevent a crawl from starting.
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("URL cannot be used as a base: {0}")]
    CannotBeABase(String),

    #[error("URL path does not name a file: {0}")]
    EmptyFileName(String),
}

/// Result type alias for Bucket-Trawler operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, RunConfig};
pub use crawler::{Coordinator, DownloadOutcome, FetchResult, NextPage};
pub use output::CrawlStats;
pub use state::{CrawlCursor, CrawlState};
pub use storage::{FileStore, LocalFileStore};
pub use crate::url::{make_listing_url, storage_path_for, StoragePath};
