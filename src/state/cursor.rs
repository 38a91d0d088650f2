use std::fmt;
use url::Url;

/// Whether the crawl still has a page to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// The cursor holds a listing page reference
    Running,

    /// The cursor is empty; the crawl is over
    Done,
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Why the cursor became empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The "next results" item carried no usable link
    LastPage,

    /// The page had no pagination control, or too few items in it
    MissingPagination,

    /// No page document was available (fetch or parse failed)
    PageUnavailable,

    /// The next-page href could not be turned into a URL
    InvalidNextLink(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastPage => write!(f, "reached last page"),
            Self::MissingPagination => write!(f, "pagination control missing"),
            Self::PageUnavailable => write!(f, "page unavailable"),
            Self::InvalidNextLink(href) => write!(f, "invalid next page link '{}'", href),
        }
    }
}

/// The crawl driver's cursor: the next listing page, or none
///
/// # Examples
///
/// ```
/// use bucket_trawler::state::{CrawlCursor, CrawlState};
/// use url::Url;
///
/// let mut cursor = CrawlCursor::new(Url::parse("https://example.com/results/xls/0").unwrap());
/// assert_eq!(cursor.state(), CrawlState::Running);
///
/// cursor.advance(None);
/// assert_eq!(cursor.state(), CrawlState::Done);
/// assert_eq!(cursor.pages_visited(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CrawlCursor {
    current: Option<Url>,
    pages_visited: u64,
}

impl CrawlCursor {
    /// Creates a running cursor positioned at the first listing page
    pub fn new(start: Url) -> Self {
        Self {
            current: Some(start),
            pages_visited: 0,
        }
    }

    /// Returns the page to visit, if any
    pub fn current(&self) -> Option<&Url> {
        self.current.as_ref()
    }

    /// Returns the current state
    pub fn state(&self) -> CrawlState {
        if self.current.is_some() {
            CrawlState::Running
        } else {
            CrawlState::Done
        }
    }

    /// Marks the current page as visited and moves to `next`
    ///
    /// Does nothing once the cursor is done; there is no way back to running.
    pub fn advance(&mut self, next: Option<Url>) {
        if self.current.is_none() {
            return;
        }

        self.pages_visited += 1;
        self.current = next;
    }

    /// Number of pages the cursor has moved past
    pub fn pages_visited(&self) -> u64 {
        self.pages_visited
    }
}
