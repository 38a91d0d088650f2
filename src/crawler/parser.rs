//! Listing page parser
//!
//! This module turns a fetched listing page into the two things the crawl
//! needs from it:
//! - The file links in the results table
//! - The URL of the next listing page, taken from the pagination control
//!
//! Markup that does not have the expected shape never produces an error; it
//! produces an empty link list or a non-`Found` [`NextPage`], logged here.

use crate::state::StopReason;
use crate::url::join_site_href;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed listing page
///
/// Holds the document tree for as long as links and the next page are being
/// read from it, then is dropped.
pub struct ListingPage {
    document: Html,
}

impl ListingPage {
    /// Parses an HTML string
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

/// Where the pagination control says to go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Absolute URL of the next listing page
    Found(Url),

    /// The "next results" item has no anchor, or its href is empty
    ///
    /// This is both how the final page looks and how a broken item looks;
    /// the markup does not let the two be told apart.
    LastPage {
        /// Markup of the offending element
        element: String,
    },

    /// No `.pagination` element, or it has fewer than two list items
    MissingControl,

    /// There was no parsed page to look at
    NoPage,

    /// The href could not be joined onto the origin
    InvalidHref {
        /// The href as found on the page
        href: String,
    },
}

impl NextPage {
    /// Consumes the outcome, keeping only a found URL
    pub fn into_url(self) -> Option<Url> {
        match self {
            Self::Found(url) => Some(url),
            _ => None,
        }
    }

    /// Returns why the crawl stops here, or `None` if there is a next page
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Found(_) => None,
            Self::LastPage { .. } => Some(StopReason::LastPage),
            Self::MissingControl => Some(StopReason::MissingPagination),
            Self::NoPage => Some(StopReason::PageUnavailable),
            Self::InvalidHref { href } => Some(StopReason::InvalidNextLink(href.clone())),
        }
    }
}

/// Everything read from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageScan {
    /// File links in document order
    pub links: Vec<String>,

    /// Next listing page
    pub next: NextPage,
}

/// Parses raw page content
///
/// The parser recovers from malformed markup, so the only way to get `None`
/// back is to pass `None` in.
pub fn parse_page(content: Option<&[u8]>) -> Option<ListingPage> {
    let Some(content) = content else {
        tracing::error!("Cannot parse page: no content");
        return None;
    };

    let page = ListingPage::from_html(&String::from_utf8_lossy(content));
    if !page.document.errors.is_empty() {
        tracing::debug!(
            "Recovered from {} markup errors while parsing page",
            page.document.errors.len()
        );
    }

    Some(page)
}

/// Compiles a selector, logging if it is rejected
fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Collects the file links from the first table on the page
///
/// # Link Extraction Rules
///
/// - Only the first `<table>` is considered
/// - Only anchors inside table cells (`td a`) are considered
/// - The `href` must start with `http`; relative, empty and missing hrefs are dropped
/// - Document order is kept; duplicates are kept
pub fn extract_links(page: Option<&ListingPage>) -> Vec<String> {
    let Some(page) = page else {
        tracing::warn!("Cannot extract links: no page");
        return Vec::new();
    };

    let (Some(table_selector), Some(anchor_selector)) = (selector("table"), selector("td a"))
    else {
        return Vec::new();
    };

    let Some(table) = page.document.select(&table_selector).next() else {
        tracing::warn!("Results table not found on page");
        return Vec::new();
    };

    table
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Computes the next listing page from the pagination control
///
/// The control's `<li>` items are the individual page links followed by two
/// summary items: "next results", then the total record count. The next page
/// is therefore the anchor of the second-to-last item. Its href is
/// site-relative and is appended to `origin`.
pub fn next_page(page: Option<&ListingPage>, origin: &Url) -> NextPage {
    let Some(page) = page else {
        tracing::warn!("Cannot find next page: no page");
        return NextPage::NoPage;
    };

    let (Some(pagination_selector), Some(item_selector), Some(anchor_selector)) =
        (selector(".pagination"), selector("li"), selector("a"))
    else {
        return NextPage::MissingControl;
    };

    let Some(pagination) = page.document.select(&pagination_selector).next() else {
        tracing::warn!("Could not find pagination element");
        return NextPage::MissingControl;
    };

    let items: Vec<ElementRef> = pagination.select(&item_selector).collect();
    if items.len() < 2 {
        tracing::warn!(
            "Pagination element has {} items, expected at least 2: {}",
            items.len(),
            pagination.html()
        );
        return NextPage::MissingControl;
    }

    let next_item = &items[items.len() - 2];
    let Some(anchor) = next_item.select(&anchor_selector).next() else {
        let element = next_item.html();
        tracing::warn!("No link in next page element: {}", element);
        return NextPage::LastPage { element };
    };

    let href = anchor.value().attr("href").map(str::trim).unwrap_or("");
    if href.is_empty() {
        let element = anchor.html();
        tracing::warn!("Invalid href value for link: {}", element);
        return NextPage::LastPage { element };
    }

    match join_site_href(origin, href) {
        Ok(url) => NextPage::Found(url),
        Err(e) => {
            tracing::warn!("Cannot build next page URL from '{}': {}", href, e);
            NextPage::InvalidHref {
                href: href.to_string(),
            }
        }
    }
}

/// Reads links and the next page from a page in one pass
pub fn scan_page(page: Option<&ListingPage>, origin: &Url) -> PageScan {
    PageScan {
        links: extract_links(page),
        next: next_page(page, origin),
    }
}
