//! Output module for crawl reporting
//!
//! Downloaded files are the crawl's real output; this module only records
//! what happened on each listing page and prints a summary at the end.

pub mod stats;

pub use stats::{print_statistics, CrawlStats, PageReport};
