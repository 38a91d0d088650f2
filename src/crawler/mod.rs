//! Crawler module for listing traversal and file downloads
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing pages
//! - Results table and pagination parsing
//! - File downloads into the file store
//! - The crawl loop tying them together

mod coordinator;
mod downloader;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use downloader::{download_file, DownloadOutcome};
pub use fetcher::{
    build_file_client, build_http_client, build_page_client, fetch_page, is_html_content_type,
    FetchResult,
};
pub use parser::{extract_links, next_page, parse_page, scan_page, ListingPage, NextPage, PageScan};
