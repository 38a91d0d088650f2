//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop. Each iteration:
//! - Fetches the listing page under the cursor
//! - Parses it and reads the file links and the next page reference
//! - Downloads every file link, one after another
//! - Moves the cursor and waits the configured delay
//!
//! The loop ends only when there is no next page. Failed pages and failed
//! downloads are logged by the components that hit them and never stop it.

use crate::config::{validate, validate_run, Config, RunConfig};
use crate::crawler::downloader::download_file;
use crate::crawler::fetcher::{build_file_client, build_page_client, fetch_page};
use crate::crawler::parser::{parse_page, scan_page, NextPage};
use crate::output::{CrawlStats, PageReport};
use crate::state::{CrawlCursor, CrawlState};
use crate::storage::{FileStore, LocalFileStore};
use crate::url::{make_listing_url, parse_origin};
use crate::TrawlError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator<S: FileStore = LocalFileStore> {
    origin: Url,
    page_client: Client,
    file_client: Client,
    store: S,
    cursor: CrawlCursor,
    delay: Duration,
}

impl Coordinator<LocalFileStore> {
    /// Creates a coordinator that stores files under `config.output.storage_root`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, cursor on the first listing page
    /// * `Err(TrawlError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: Config, run: RunConfig) -> Result<Self, TrawlError> {
        let store = LocalFileStore::new(&config.output.storage_root);
        Self::with_store(config, run, store)
    }
}

impl<S: FileStore> Coordinator<S> {
    /// Creates a coordinator writing into the given store
    pub fn with_store(config: Config, run: RunConfig, store: S) -> Result<Self, TrawlError> {
        validate(&config)?;
        validate_run(&run)?;

        let origin = parse_origin(&config.site.origin)?;
        let start = make_listing_url(&origin, &run.search_term, run.start_offset)?;

        let page_client = build_page_client(&config)?;
        let file_client = build_file_client(&config)?;

        Ok(Self {
            origin,
            page_client,
            file_client,
            store,
            cursor: CrawlCursor::new(start),
            delay: Duration::from_millis(run.delay_ms),
        })
    }

    /// Returns the crawl cursor
    pub fn cursor(&self) -> &CrawlCursor {
        &self.cursor
    }

    /// Runs the crawl loop until the listing runs out of pages
    ///
    /// There is no iteration cap and no cancellation; the loop runs until the
    /// cursor is done or the process is stopped.
    pub async fn run(&mut self) -> CrawlStats {
        let mut stats = CrawlStats::new();
        let mut stop_reason = None;

        if let Some(start) = self.cursor.current() {
            tracing::info!("Starting point: {}", start);
        }

        loop {
            let url = match self.cursor.current() {
                Some(url) => url.clone(),
                None => {
                    tracing::info!("No next page, exiting");
                    break;
                }
            };

            let (report, next) = self.process_page(&url).await;
            tracing::info!(
                "Page {} done: {} links, {} stored, {} skipped",
                url,
                report.links_found,
                report.files_stored,
                report.files_skipped
            );
            stats.record_page(report);

            if let Some(reason) = next.stop_reason() {
                stop_reason = Some(reason);
            }
            self.cursor.advance(next.into_url());

            tracing::info!("Sleeping for {}ms", self.delay.as_millis());
            tokio::time::sleep(self.delay).await;

            if let Some(next_url) = self.cursor.current() {
                tracing::info!("Next page: {}", next_url);
            }
        }

        debug_assert_eq!(self.cursor.state(), CrawlState::Done);
        stats.finish(stop_reason);

        tracing::info!(
            "Crawl completed: {} pages, {} files stored in {}ms",
            stats.pages_fetched(),
            stats.files_stored(),
            stats.duration().map(|d| d.num_milliseconds()).unwrap_or(0)
        );

        stats
    }

    /// Fetches one listing page and downloads every file it links to
    async fn process_page(&self, url: &Url) -> (PageReport, NextPage) {
        let fetched = fetch_page(&self.page_client, url).await;
        let available = fetched.is_success();
        let body = fetched.into_body();

        // The parsed document is dropped here, before any download starts
        let scan = {
            let page = parse_page(body.as_deref());
            scan_page(page.as_ref(), &self.origin)
        };

        let mut report = PageReport::new(url.clone(), available, scan.links.len());

        for link in &scan.links {
            tracing::info!("Getting {}", link);
            if download_file(&self.file_client, &self.store, link)
                .await
                .is_stored()
            {
                report.files_stored += 1;
            } else {
                report.files_skipped += 1;
            }
        }

        (report, scan.next)
    }
}

/// Runs a complete crawl with files stored on the local filesystem
///
/// # Example
///
/// ```no_run
/// use bucket_trawler::config::{Config, RunConfig};
/// use bucket_trawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let run = RunConfig {
///     start_offset: 0,
///     search_term: "xls".to_string(),
///     delay_ms: 1000,
/// };
/// let stats = run_crawl(Config::default(), run).await?;
/// println!("{} files stored", stats.files_stored());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, run: RunConfig) -> Result<CrawlStats, TrawlError> {
    let mut coordinator = Coordinator::new(config, run)?;
    Ok(coordinator.run().await)
}
