//! State module for tracking crawl progress
//!
//! The crawl has exactly one piece of mutable state, the [`CrawlCursor`]: the
//! listing page to visit next, or nothing once the listing is exhausted.

mod cursor;

pub use cursor::{CrawlCursor, CrawlState, StopReason};
