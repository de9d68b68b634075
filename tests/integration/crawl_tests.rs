//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use pulse::config::Config;
use pulse::crawler::{crawl, CrawlOutput, SkipReason};
use pulse::robots::MAX_ROBOTS_REDIRECTS;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a fast test configuration seeded with the server root
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config {
        seeds: vec![format!("{}/", server.uri())],
        ..Config::default()
    };
    config.crawler.delay = 0.0;
    config.crawler.max_retries = 0;
    config.crawler.timeout = 5;
    config
}

/// Builds an HTML page linking to the given hrefs
fn page_with_links(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><h1>{}</h1>{}</body></html>",
        title, title, anchors
    )
}

/// Mounts an HTML page expected to be requested exactly `times` times
async fn mount_page(server: &MockServer, page_path: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_redirect(server: &MockServer, from: &str, to: &str) {
    Mock::given(method("GET"))
        .and(path(from))
        .respond_with(ResponseTemplate::new(301).insert_header("location", to))
        .mount(server)
        .await;
}

fn fetched_paths(output: &CrawlOutput) -> Vec<String> {
    output.pages.iter().map(|p| p.url.path().to_string()).collect()
}

#[tokio::test]
async fn test_breadth_first_order_and_max_pages() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/a", "/b", "/c", "/d"]), 1).await;
    mount_page(&server, "/a", page_with_links("A", &["/a/deep"]), 1).await;
    mount_page(&server, "/b", page_with_links("B", &[]), 1).await;
    mount_page(&server, "/c", page_with_links("C", &[]), 0).await;
    mount_page(&server, "/d", page_with_links("D", &[]), 0).await;
    mount_page(&server, "/a/deep", page_with_links("Deep", &[]), 0).await;

    let mut config = create_test_config(&server);
    config.crawler.max_pages = 3;

    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/a", "/b"]);
    assert!(output.pages.len() <= config.crawler.max_pages as usize);
}

#[tokio::test]
async fn test_max_depth_zero_fetches_only_seeds() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", page_with_links("A", &[]), 0).await;
    mount_page(&server, "/b", page_with_links("B", &[]), 0).await;

    let mut config = create_test_config(&server);
    config.crawler.max_depth = 0;

    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/"]);
    assert_eq!(output.pages[0].depth, 0);
}

#[tokio::test]
async fn test_depth_limit_respected() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/one"]), 1).await;
    mount_page(&server, "/one", page_with_links("One", &["/two"]), 1).await;
    mount_page(&server, "/two", page_with_links("Two", &["/three"]), 1).await;
    mount_page(&server, "/three", page_with_links("Three", &[]), 0).await;

    let mut config = create_test_config(&server);
    config.crawler.max_depth = 2;

    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/one", "/two"]);
    assert!(output.pages.iter().all(|p| p.depth <= 2));
}

#[tokio::test]
async fn test_no_url_requested_twice() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page_with_links(
            "Home",
            &["/a", "/a#install", "/a/", "/a?utm_source=nav", "/", "/b", "//a"],
        ),
        1,
    )
    .await;
    mount_page(&server, "/a", page_with_links("A", &["/", "/b", "../a", "b"]), 1).await;
    mount_page(&server, "/b", page_with_links("B", &["/a", "/"]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private\n"),
        )
        .mount(&server)
        .await;

    mount_page(&server, "/", page_with_links("Home", &["/private", "/public"]), 1).await;
    mount_page(&server, "/private", page_with_links("Private", &[]), 0).await;
    mount_page(&server, "/public", page_with_links("Public", &[]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/public"]);
    assert_eq!(output.skipped_with(SkipReason::RobotsDisallowed), 1);
    let skipped = &output.skipped[0];
    assert_eq!(skipped.url.path(), "/private");
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .expect(0)
        .mount(&server)
        .await;

    mount_page(&server, "/", page_with_links("Home", &[]), 1).await;

    let mut config = create_test_config(&server);
    config.crawler.respect_robots = false;

    let output = crawl(&config).await.expect("crawl failed");
    assert_eq!(fetched_paths(&output), vec!["/"]);
}

#[tokio::test]
async fn test_redirect_off_domain_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;

    let off_domain = format!("http://localhost:{}/landing", other.address().port());
    mount_redirect(&server, "/", &off_domain).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<h1>Elsewhere</h1>", "text/html"))
        .expect(0)
        .mount(&other)
        .await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert!(output.pages.is_empty());
    assert_eq!(output.skipped_with(SkipReason::RedirectOutOfScope), 1);
    assert_eq!(output.skipped[0].status, Some(301));
}

#[tokio::test]
async fn test_redirect_within_scope_followed() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/moved"]), 1).await;
    mount_redirect(&server, "/moved", "/target").await;
    mount_page(&server, "/target", page_with_links("Target", &["/target"]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/target"]);
    let page = &output.pages[1];
    assert_eq!(page.requested_url.path(), "/moved");
    assert_eq!(page.depth, 1);
}

#[tokio::test]
async fn test_redirect_to_queued_url_not_refetched() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/old", "/new"]), 1).await;
    mount_redirect(&server, "/old", "/new").await;
    mount_page(&server, "/new", page_with_links("New", &[]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/new"]);
    assert_eq!(output.skipped_with(SkipReason::DuplicateRedirect), 1);
}

#[tokio::test]
async fn test_failures_recorded_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page_with_links("Home", &["/missing", "/broken", "/data", "/ok"]),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    mount_page(&server, "/ok", page_with_links("Ok", &[]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/ok"]);
    assert_eq!(output.skipped_with(SkipReason::DeadLink), 1);
    assert_eq!(output.skipped_with(SkipReason::HttpError), 1);
    assert_eq!(output.skipped_with(SkipReason::ContentMismatch), 1);

    let broken = output
        .skipped
        .iter()
        .find(|s| s.reason == SkipReason::HttpError)
        .unwrap();
    assert_eq!(broken.status, Some(500));
}

#[tokio::test]
async fn test_transient_errors_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/", page_with_links("Home", &[]), 1).await;

    let mut config = create_test_config(&server);
    config.crawler.max_retries = 1;

    let output = crawl(&config).await.expect("crawl failed");
    assert_eq!(fetched_paths(&output), vec!["/"]);
}

#[tokio::test]
async fn test_filtered_links_never_requested() {
    let server = MockServer::start().await;

    let off_domain = format!("http://localhost:{}/elsewhere", server.address().port());
    mount_page(
        &server,
        "/",
        page_with_links(
            "Home",
            &["/login", "/legal/terms", "/manual.pdf", "mailto:docs@example.com", &off_domain],
        ),
        1,
    )
    .await;

    mount_page(&server, "/login", page_with_links("Login", &[]), 0).await;
    mount_page(&server, "/legal/terms", page_with_links("Terms", &[]), 0).await;
    mount_page(&server, "/elsewhere", page_with_links("Elsewhere", &[]), 0).await;

    Mock::given(method("GET"))
        .and(path("/manual.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF", "application/pdf"))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/"]);
}

async fn mount_robots(server: &MockServer, robots_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(robots_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_robots_behind_redirect_respected() {
    let server = MockServer::start().await;

    mount_redirect(&server, "/robots.txt", "/meta/robots.txt").await;
    mount_robots(&server, "/meta/robots.txt", "User-agent: *\nDisallow: /private\n").await;

    mount_page(&server, "/", page_with_links("Home", &["/private/page", "/public"]), 1).await;
    mount_page(&server, "/private/page", page_with_links("Private", &[]), 0).await;
    mount_page(&server, "/public", page_with_links("Public", &[]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/public"]);
    assert_eq!(output.skipped_with(SkipReason::RobotsDisallowed), 1);
    assert_eq!(output.skipped[0].url.path(), "/private/page");
}

#[tokio::test]
async fn test_robots_redirect_loop_means_allow_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/robots.txt"))
        .expect(MAX_ROBOTS_REDIRECTS as u64 + 1)
        .mount(&server)
        .await;

    mount_page(&server, "/", page_with_links("Home", &["/guide"]), 1).await;
    mount_page(&server, "/guide", page_with_links("Guide", &[]), 1).await;

    let config = create_test_config(&server);
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(fetched_paths(&output), vec!["/", "/guide"]);
}

#[tokio::test]
async fn test_politeness_delay_between_requests() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_with_links("Home", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", page_with_links("A", &[]), 1).await;
    mount_page(&server, "/b", page_with_links("B", &[]), 1).await;

    let mut config = create_test_config(&server);
    config.crawler.delay = 0.2;
    config.crawler.respect_robots = false;

    let started = Instant::now();
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(output.pages.len(), 3);
    assert!(
        started.elapsed() >= Duration::from_millis(400),
        "three requests finished in {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_robots_crawl_delay_raises_delay() {
    let server = MockServer::start().await;

    mount_robots(&server, "/robots.txt", "User-agent: *\nCrawl-delay: 1\n").await;
    mount_page(&server, "/", page_with_links("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", page_with_links("A", &[]), 1).await;

    let config = create_test_config(&server);
    assert_eq!(config.crawler.delay, 0.0);

    let started = Instant::now();
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(output.pages.len(), 2);
    assert!(
        started.elapsed() >= Duration::from_secs(1),
        "two requests finished in {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_robots_crawl_delay_never_lowers_delay() {
    let server = MockServer::start().await;

    mount_robots(&server, "/robots.txt", "User-agent: *\nCrawl-delay: 0.05\n").await;
    mount_page(&server, "/", page_with_links("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", page_with_links("A", &[]), 1).await;

    let mut config = create_test_config(&server);
    config.crawler.delay = 0.5;

    let started = Instant::now();
    let output = crawl(&config).await.expect("crawl failed");

    assert_eq!(output.pages.len(), 2);
    assert!(
        started.elapsed() >= Duration::from_millis(500),
        "two requests finished in {:?}",
        started.elapsed()
    );
}
