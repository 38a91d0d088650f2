//! Bucket-Trawler main entry point
//!
//! This is the command-line interface for the Bucket-Trawler listing crawler.

use bucket_trawler::config::{load_config_with_hash, validate, validate_run, Config, RunConfig};
use bucket_trawler::crawler::Coordinator;
use bucket_trawler::output::print_statistics;
use bucket_trawler::url::{make_listing_url, parse_origin};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bucket-Trawler: download the files linked from a paginated bucket listing
///
/// Starting at the given result offset, Bucket-Trawler walks the search
/// results for SEARCH_VALUE page by page and saves every linked file under a
/// directory named after the file's host.
#[derive(Parser, Debug)]
#[command(name = "bucket-trawler")]
#[command(version)]
#[command(about = "Download files linked from a paginated bucket listing", long_about = None)]
struct Cli {
    /// Pagination value to start on (0 for the beginning)
    #[arg(value_name = "PAGINATION_START")]
    pagination_start: u64,

    /// Search value, e.g. 'xls'
    #[arg(value_name = "SEARCH_VALUE")]
    search_value: String,

    /// Delay between listing page requests in milliseconds
    #[arg(value_name = "REQUEST_DELAY_MS")]
    request_delay_ms: u64,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the listing origin, e.g. https://buckets.example.com
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// Directory under which host directories are created
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show the first listing URL without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let run = RunConfig {
        start_offset: cli.pagination_start,
        search_term: cli.search_value.clone(),
        delay_ms: cli.request_delay_ms,
    };

    if cli.dry_run {
        handle_dry_run(&config, &run)?;
    } else {
        handle_crawl(config, run).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bucket_trawler=info,warn"),
            1 => EnvFilter::new("bucket_trawler=debug,info"),
            2 => EnvFilter::new("bucket_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: file (or defaults), then CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(origin) = &cli.origin {
        config.site.origin = origin.clone();
    }

    if let Some(dir) = &cli.output_dir {
        config.output.storage_root = dir.to_string_lossy().into_owned();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: validates settings and shows where the crawl would start
fn handle_dry_run(config: &Config, run: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_run(run)?;
    let origin = parse_origin(&config.site.origin)?;
    let start = make_listing_url(&origin, &run.search_term, run.start_offset)?;

    println!("=== Bucket-Trawler Dry Run ===\n");

    println!("Listing:");
    println!("  Origin: {}", config.site.origin);
    println!("  Search term: {}", run.search_term);
    println!("  Start offset: {}", run.start_offset);
    println!("  Delay between pages: {}ms", run.delay_ms);

    println!("\nHTTP:");
    println!("  User agent: {}", config.user_agent.header_value());
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    match config.crawler.file_timeout_secs {
        0 => println!("  File timeout: none"),
        secs => println!("  File timeout: {}s", secs),
    }
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);

    println!("\nOutput:");
    println!("  Storage root: {}", config.output.storage_root);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", start);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, run: RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Searching '{}' on {} from offset {}, {}ms between pages",
        run.search_term,
        config.site.origin,
        run.start_offset,
        run.delay_ms
    );
    tracing::info!("Storing files under: {}", config.output.storage_root);

    let mut coordinator = match Coordinator::new(config, run) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            tracing::error!("Crawl failed to start: {}", e);
            return Err(e.into());
        }
    };

    let stats = coordinator.run().await;
    print_statistics(&stats);

    Ok(())
}
