//! HTTP fetcher implementation
//!
//! This module handles listing page requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Rejecting responses on status and Content-Type before the body is read
//! - Classifying network failures

use crate::config::Config;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for listing pages
const MAX_PAGE_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Raw page body
        body: Vec<u8>,
    },

    /// Status was 200 but the page is not HTML
    ContentMismatch {
        /// The Content-Type received, if any
        content_type: Option<String>,
    },

    /// Any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, reset, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the fetch produced a usable HTML body
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Consumes the result, keeping only the body of a successful fetch
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `redirects` - Redirect policy for this client
/// * `timeout` - Deadline for a whole request including the body, or `None`
///   to bound only the connect phase
///
/// # Example
///
/// ```no_run
/// use bucket_trawler::config::Config;
/// use bucket_trawler::crawler::build_http_client;
/// use reqwest::redirect::Policy;
///
/// let client = build_http_client(&Config::default(), Policy::none(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &Config,
    redirects: Policy,
    timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.header_value())
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(redirects)
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Builds the client used for listing pages, which follows redirects
pub fn build_page_client(config: &Config) -> Result<Client, reqwest::Error> {
    build_http_client(
        config,
        Policy::limited(MAX_PAGE_REDIRECTS),
        Some(Duration::from_secs(config.crawler.request_timeout_secs)),
    )
}

/// Builds the client used for file links, which never follows redirects
///
/// A redirected file link is treated as stale, so the 3xx response itself is
/// what the downloader sees. Bodies can be arbitrarily large, so the total
/// deadline is `file-timeout-secs` and 0 leaves it unbounded.
pub fn build_file_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = match config.crawler.file_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    build_http_client(config, Policy::none(), timeout)
}

/// Returns true if a Content-Type header value denotes HTML
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.to_ascii_lowercase().contains("html"))
        .unwrap_or(false)
}

/// Fetches one listing page
///
/// # Request Flow
///
/// 1. Send GET and wait for the response headers only
/// 2. Status other than 200 → `HttpError`
/// 3. Content-Type missing or not HTML → `ContentMismatch`
/// 4. Read the full body → `Success`
///
/// Rejected responses are dropped before their body is downloaded. Every
/// failure is logged here; none of them is fatal to the crawl.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::warn!("Error during request to {}: {}", url, error);
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("Invalid response at {}: HTTP {}", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if !is_html_content_type(content_type.as_deref()) {
        tracing::warn!(
            "Invalid response at {}: expected HTML, got {}",
            url,
            content_type.as_deref().unwrap_or("no Content-Type")
        );
        return FetchResult::ContentMismatch { content_type };
    }

    if response.url() != url {
        tracing::info!("Listing page {} redirected to {}", url, response.url());
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            body: body.to_vec(),
        },
        Err(e) => {
            tracing::warn!("Error reading body of {}: {}", url, e);
            FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    }
}
