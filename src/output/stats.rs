//! Statistics collected during a crawl

use crate::state::StopReason;
use chrono::{DateTime, Utc};
use url::Url;

/// What happened on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// The listing page URL
    pub url: Url,

    /// Whether the page was fetched as HTML
    pub available: bool,

    /// Number of file links extracted
    pub links_found: usize,

    /// Number of files written
    pub files_stored: usize,

    /// Number of links that did not produce a file
    pub files_skipped: usize,
}

impl PageReport {
    /// Creates a report for a page with no downloads recorded yet
    pub fn new(url: Url, available: bool, links_found: usize) -> Self {
        Self {
            url,
            available,
            links_found,
            files_stored: 0,
            files_skipped: 0,
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// One report per visited listing page, in visit order
    pub pages: Vec<PageReport>,

    /// Why the crawl ended (`None` while it is still running)
    pub stop_reason: Option<StopReason>,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl ended
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStats {
    /// Starts a new, empty record
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            stop_reason: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Adds the report for a visited page
    pub fn record_page(&mut self, report: PageReport) {
        self.pages.push(report);
    }

    /// Marks the crawl as finished
    pub fn finish(&mut self, reason: Option<StopReason>) {
        if reason.is_some() {
            self.stop_reason = reason;
        }
        self.finished_at = Some(Utc::now());
    }

    /// Number of listing pages requested
    pub fn pages_fetched(&self) -> usize {
        self.pages.len()
    }

    /// Number of listing pages that could not be used
    pub fn pages_unavailable(&self) -> usize {
        self.pages.iter().filter(|p| !p.available).count()
    }

    /// Total file links found across all pages
    pub fn links_found(&self) -> usize {
        self.pages.iter().map(|p| p.links_found).sum()
    }

    /// Total files written
    pub fn files_stored(&self) -> usize {
        self.pages.iter().map(|p| p.files_stored).sum()
    }

    /// Total links skipped
    pub fn files_skipped(&self) -> usize {
        self.pages.iter().map(|p| p.files_skipped).sum()
    }

    /// Elapsed time, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!(
        "  Listing pages fetched: {} ({} unavailable)",
        stats.pages_fetched(),
        stats.pages_unavailable()
    );
    println!("  File links found: {}", stats.links_found());
    println!("  Files stored: {}", stats.files_stored());
    println!("  Files skipped: {}", stats.files_skipped());
    if let Some(duration) = stats.duration() {
        println!("  Duration: {}s", duration.num_seconds());
    }
    println!();

    if let Some(reason) = &stats.stop_reason {
        println!("Stopped: {}", reason);
    }

    let attempted = stats.links_found();
    let success_rate = if attempted > 0 {
        (stats.files_stored() as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} files stored)",
        success_rate,
        stats.files_stored(),
        attempted
    );
}
