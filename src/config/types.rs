use serde::Deserialize;

/// Default site whose listing is crawled
pub const DEFAULT_ORIGIN: &str = "https://buckets.grayhatwarfare.com";

/// Settings for a crawl, loaded from an optional TOML file
///
/// Every section and key has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// The site serving the paginated listing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the listing, e.g. "https://buckets.example.com"
    pub origin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Total time allowed for a listing page request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Total time allowed for a file download including its body (seconds, 0 = no limit)
    #[serde(rename = "file-timeout-secs")]
    pub file_timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            file_timeout_secs: 0,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "BucketTrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value as `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which per-host directories are created
    #[serde(rename = "storage-root")]
    pub storage_root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            storage_root: ".".to_string(),
        }
    }
}

/// The three values that select and pace one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Zero-based index of the first result on the first page to visit
    pub start_offset: u64,

    /// Search term placed in the listing URL
    pub search_term: String,

    /// Pause between listing pages (milliseconds)
    pub delay_ms: u64,
}
