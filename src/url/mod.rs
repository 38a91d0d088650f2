//! URL handling module for Bucket-Trawler
//!
//! This module builds listing page URLs, joins site-relative pagination links
//! onto the configured origin and maps file links to local storage paths.

mod listing;
mod storage_path;

pub use listing::{join_site_href, make_listing_url, parse_origin};
pub use storage_path::{flatten_path, storage_path_for, StoragePath};

/// Returns true if the URL uses a scheme the crawler can fetch
pub fn is_http_scheme(url: &::url::Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
