//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a fake listing site and fake bucket
//! files, and check the full crawl cycle end-to-end.

use bucket_trawler::config::{Config, RunConfig};
use bucket_trawler::crawler::Coordinator;
use bucket_trawler::state::{CrawlState, StopReason};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(origin: &str, storage_root: &Path) -> Config {
    let mut config = Config::default();
    config.site.origin = origin.to_string();
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.output.storage_root = storage_root.to_string_lossy().into_owned();
    config
}

fn run_config(start_offset: u64, delay_ms: u64) -> RunConfig {
    RunConfig {
        start_offset,
        search_term: "xls".to_string(),
        delay_ms,
    }
}

/// Renders a listing page: one results table, then the pagination control
///
/// The pagination list is `[1, 2, next, max]`, with `next_href` on the
/// second-to-last item.
fn listing_page(cell_hrefs: &[String], next_href: &str) -> String {
    let rows: String = cell_hrefs
        .iter()
        .map(|href| format!(r#"<tr><td><a href="{}">file</a></td><td>1 KB</td></tr>"#, href))
        .collect();

    format!(
        r#"<html><head><title>Results</title></head><body>
        <table class="table"><thead><tr><th>File</th><th>Size</th></tr></thead>
        <tbody>{}</tbody></table>
        <ul class="pagination">
            <li><a href="/results/xls/0">1</a></li>
            <li><a href="/results/xls/20">2</a></li>
            <li><a href="{}">Next 20</a></li>
            <li><a href="/results/xls/397900">397912</a></li>
        </ul>
        </body></html>"#,
        rows, next_href
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, file_path: &str, contents: &[u8], hits: u64) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(contents.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_page_crawl_reaches_done() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let storage = TempDir::new().expect("Failed to create temp dir");

    mount_page(
        &mock_server,
        "/results/xls/0",
        listing_page(
            &[
                format!("{}/bucket-a/reports/q1.xls", base_url),
                "/results/not-a-file".to_string(),
                format!("{}/bucket-b/q2.xls", base_url),
            ],
            "/results/xls/20",
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/results/xls/20",
        listing_page(&["/relative/only.xls".to_string()], ""),
    )
    .await;

    mount_file(&mock_server, "/bucket-a/reports/q1.xls", b"first file", 1).await;
    mount_file(&mock_server, "/bucket-b/q2.xls", b"second file", 1).await;

    let config = create_test_config(&base_url, storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(coordinator.cursor().state(), CrawlState::Done);
    assert_eq!(coordinator.cursor().pages_visited(), 2);

    assert_eq!(stats.pages_fetched(), 2);
    assert_eq!(stats.pages[0].url.path(), "/results/xls/0");
    assert_eq!(stats.pages[0].links_found, 2);
    assert_eq!(stats.pages[1].url.path(), "/results/xls/20");
    assert_eq!(stats.pages[1].links_found, 0);
    assert_eq!(stats.files_stored(), 2);
    assert_eq!(stats.files_skipped(), 0);
    assert_eq!(stats.stop_reason, Some(StopReason::LastPage));

    let host_dir = storage.path().join("127.0.0.1");
    assert_eq!(
        std::fs::read(host_dir.join("bucket-a_reports_q1.xls")).expect("q1 missing"),
        b"first file"
    );
    assert_eq!(
        std::fs::read(host_dir.join("bucket-b_q2.xls")).expect("q2 missing"),
        b"second file"
    );

    // Wiremock verifies the expect() counts when mock_server drops
}

#[tokio::test]
async fn test_failed_downloads_do_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let storage = TempDir::new().expect("Failed to create temp dir");

    mount_page(
        &mock_server,
        "/results/xls/0",
        listing_page(
            &[
                format!("{}/gone.xls", base_url),
                format!("{}/moved.xls", base_url),
            ],
            "/results/xls/20",
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/results/xls/20",
        listing_page(&[format!("{}/ok.xls", base_url)], ""),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/gone.xls"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/moved.xls"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/ok.xls", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Only the link on page 20 reaches it; the redirect above is not followed
    mount_file(&mock_server, "/ok.xls", b"ok", 1).await;

    let config = create_test_config(&base_url, storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.pages_fetched(), 2);
    assert_eq!(stats.pages[0].files_skipped, 2);
    assert_eq!(stats.pages[1].files_stored, 1);

    let host_dir = storage.path().join("127.0.0.1");
    assert!(host_dir.join("ok.xls").exists());
    assert!(!host_dir.join("gone.xls").exists());
    assert!(!host_dir.join("moved.xls").exists());
}

#[tokio::test]
async fn test_unavailable_first_page_ends_crawl() {
    let mock_server = MockServer::start().await;
    let storage = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/results/xls/0"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("<html></html>", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.pages_fetched(), 1);
    assert_eq!(stats.pages_unavailable(), 1);
    assert_eq!(stats.links_found(), 0);
    assert_eq!(stats.stop_reason, Some(StopReason::PageUnavailable));
    assert!(!storage.path().join("127.0.0.1").exists());
}

#[tokio::test]
async fn test_non_html_page_is_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let storage = TempDir::new().expect("Failed to create temp dir");

    // Valid listing markup, but served as JSON: nothing on it may be followed
    Mock::given(method("GET"))
        .and(path("/results/xls/0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            listing_page(&[format!("{}/file.xls", base_url)], "/results/xls/20"),
            "application/json",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_file(&mock_server, "/file.xls", b"x", 0).await;

    let config = create_test_config(&base_url, storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.pages_fetched(), 1);
    assert_eq!(stats.files_stored(), 0);
    assert_eq!(stats.stop_reason, Some(StopReason::PageUnavailable));
}

#[tokio::test]
async fn test_missing_pagination_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let storage = TempDir::new().expect("Failed to create temp dir");

    mount_page(
        &mock_server,
        "/results/xls/40",
        format!(
            r#"<html><body><table><tr><td><a href="{}/only.xls">f</a></td></tr></table></body></html>"#,
            base_url
        ),
    )
    .await;
    mount_file(&mock_server, "/only.xls", b"only", 1).await;

    let config = create_test_config(&base_url, storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(40, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.pages_fetched(), 1);
    assert_eq!(stats.files_stored(), 1);
    assert_eq!(stats.stop_reason, Some(StopReason::MissingPagination));
}

#[tokio::test]
async fn test_duplicate_links_across_pages_are_fetched_again() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let storage = TempDir::new().expect("Failed to create temp dir");
    let shared = format!("{}/shared/data.csv", base_url);

    mount_page(
        &mock_server,
        "/results/xls/0",
        listing_page(&[shared.clone()], "/results/xls/20"),
    )
    .await;
    mount_page(
        &mock_server,
        "/results/xls/20",
        listing_page(&[shared], ""),
    )
    .await;
    mount_file(&mock_server, "/shared/data.csv", b"a,b,c", 2).await;

    let config = create_test_config(&base_url, storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 0)).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.files_stored(), 2);
    assert_eq!(
        std::fs::read(storage.path().join("127.0.0.1").join("shared_data.csv"))
            .expect("file missing"),
        b"a,b,c"
    );
}

#[tokio::test]
async fn test_delay_between_pages() {
    let mock_server = MockServer::start().await;
    let storage = TempDir::new().expect("Failed to create temp dir");

    mount_page(
        &mock_server,
        "/results/xls/0",
        listing_page(&[], "/results/xls/20"),
    )
    .await;
    mount_page(&mock_server, "/results/xls/20", listing_page(&[], "")).await;

    let config = create_test_config(&mock_server.uri(), storage.path());
    let mut coordinator =
        Coordinator::new(config, run_config(0, 60)).expect("Failed to create coordinator");

    let started = std::time::Instant::now();
    let stats = coordinator.run().await;

    // One pause after each of the two pages
    assert!(started.elapsed() >= std::time::Duration::from_millis(120));
    assert_eq!(stats.pages_fetched(), 2);
}
