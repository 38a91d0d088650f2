//! Configuration module for Bucket-Trawler
//!
//! Site and client settings are read from an optional TOML file; the values that
//! pick a particular crawl (start offset, search term, delay) arrive as a
//! [`RunConfig`] built by the caller.
//!
//! # Example
//!
//! ```no_run
//! use bucket_trawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trawler.toml")).unwrap();
//! println!("Listing origin: {}", config.site.origin);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, RunConfig, SiteConfig, UserAgentConfig, DEFAULT_ORIGIN,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, validate_run};
