//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_inspector::config::{Config, CrawlerConfig, HttpConfig, OutputConfig, SpellingConfig};
use site_inspector::crawler::Coordinator;
use site_inspector::output::{render_report, write_reports, CrawlReport};
use site_inspector::spelling::{Dictionary, SpellCheck};
use site_inspector::state::PageStatus;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short delays and timeouts
fn create_test_config(max_pages: u32, max_workers: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            max_workers,
            politeness_delay: 10, // Very short for testing
        },
        http: HttpConfig {
            user_agent: "TestInspector/1.0".to_string(),
            page_timeout: 2,
            link_check_timeout: 2,
            robots_timeout: 1,
        },
        spelling: SpellingConfig::default(),
        output: OutputConfig::default(),
    }
}

fn checker() -> Arc<dyn SpellCheck> {
    Arc::new(Dictionary::from_words([
        "hello", "world", "home", "page", "about", "welcome", "to", "the", "site",
    ]))
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

async fn mount_page_once(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(1)
        .mount(server)
        .await;
}

/// Answers every HEAD request with 200
async fn mount_head_ok(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

fn links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">page</a>"#, href))
        .collect();
    format!("<html><body><p>Welcome to the site</p>{}</body></html>", anchors)
}

fn page_key(server: &MockServer, route: &str) -> String {
    format!("{}{}", server.uri(), route)
}

async fn run(config: Config, seed: &str) -> (CrawlReport, Coordinator) {
    let mut coordinator = Coordinator::new(config, seed, checker()).expect("valid seed");
    let report = coordinator
        .run(CancellationToken::new())
        .await
        .expect("crawl runs");
    (report, coordinator)
}

#[tokio::test]
async fn test_crawl_stays_on_site() {
    let server = MockServer::start().await;
    // Same server under another host name counts as an external site
    let external = format!("http://localhost:{}/x", server.address().port());

    mount_head_ok(&server).await;
    mount_page(&server, "/", links(&["/b", &external])).await;
    mount_page(&server, "/b", links(&[])).await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(links(&[]), "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, _) = run(create_test_config(5, 2), &server.uri()).await;

    let urls: Vec<&str> = report.urls().collect();
    assert_eq!(urls, vec![page_key(&server, "/"), page_key(&server, "/b")]);
}

#[tokio::test]
async fn test_several_workers_record_exactly_budget() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    let all: Vec<String> = (0..10).map(|i| format!("/p{}", i)).collect();
    let hrefs: Vec<&str> = all.iter().map(String::as_str).collect();
    mount_page(&server, "/", links(&hrefs)).await;
    for route in &all {
        mount_page(&server, route, links(&hrefs)).await;
    }

    let (report, coordinator) = run(create_test_config(4, 3), &server.uri()).await;

    assert_eq!(report.len(), 4);
    assert_eq!(
        coordinator.statistics().count(PageStatus::Processed),
        report.len() as u64
    );
}

#[tokio::test]
async fn test_single_worker_crawls_exactly_budget() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    mount_page(&server, "/", links(&["/a", "/b", "/c"])).await;
    mount_page(&server, "/a", links(&["/d", "/e"])).await;
    mount_page(&server, "/b", links(&["/"])).await;
    mount_page(&server, "/c", links(&[])).await;
    mount_page(&server, "/d", links(&[])).await;
    mount_page(&server, "/e", links(&[])).await;

    let (report, _) = run(create_test_config(4, 1), &server.uri()).await;

    assert_eq!(report.len(), 4);
    assert!(report.contains(&page_key(&server, "/")));
}

#[tokio::test]
async fn test_every_page_fetched_exactly_once() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    // A cyclic site: every page links to every other page
    let routes = ["/", "/one", "/two", "/three"];
    for route in routes {
        mount_page_once(&server, route, links(&routes)).await;
    }

    let (report, _) = run(create_test_config(50, 3), &server.uri()).await;

    assert_eq!(report.len(), routes.len());
    for route in routes {
        assert!(report.contains(&page_key(&server, route)), "missing {}", route);
    }
}

#[tokio::test]
async fn test_fragment_and_duplicate_links_collapse() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    mount_page_once(&server, "/", links(&["/a", "/a#top", "/a", "#self"])).await;
    mount_page_once(&server, "/a", links(&["/", "/a#again"])).await;

    let (report, _) = run(create_test_config(10, 2), &server.uri()).await;

    assert_eq!(report.len(), 2);
}

#[tokio::test]
async fn test_unavailable_robots_allows_everything() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/", links(&["/admin"])).await;
    mount_page(&server, "/admin", links(&[])).await;

    let (report, _) = run(create_test_config(10, 2), &server.uri()).await;

    assert_eq!(report.len(), 2);
    assert!(report.contains(&page_key(&server, "/admin")));
}

#[tokio::test]
async fn test_robots_disallowed_pages_skipped() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/", links(&["/private/secret", "/public"])).await;
    mount_page(&server, "/public", links(&[])).await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(links(&[]), "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, coordinator) = run(create_test_config(10, 2), &server.uri()).await;

    let urls: Vec<&str> = report.urls().collect();
    assert_eq!(urls, vec![page_key(&server, "/"), page_key(&server, "/public")]);
    assert_eq!(coordinator.statistics().count(PageStatus::Disallowed), 1);
}

#[tokio::test]
async fn test_broken_image_reported() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body><p>Welcome</p><img src="/missing.png"><img src="/logo.png"></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (report, _) = run(create_test_config(5, 1), &server.uri()).await;

    let page = report.get(&page_key(&server, "/")).expect("seed recorded");
    assert_eq!(page.broken_links, vec![page_key(&server, "/missing.png")]);
}

#[tokio::test]
async fn test_misspelling_with_suggestion() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><body><p>Helo world</p><script>var notaword = 1;</script></body></html>".to_string(),
    )
    .await;

    let (report, _) = run(create_test_config(5, 1), &server.uri()).await;

    let page = report.get(&page_key(&server, "/")).expect("seed recorded");
    assert_eq!(page.spelling_issues.len(), 1);
    assert_eq!(page.spelling_issues.get("Helo"), Some(&Some("Hello".to_string())));
}

#[tokio::test]
async fn test_non_html_pages_not_recorded() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    mount_page(&server, "/", links(&["/doc.pdf", "/next"])).await;
    mount_page(&server, "/next", links(&[])).await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 8], "application/pdf"))
        .mount(&server)
        .await;

    let (report, coordinator) = run(create_test_config(10, 2), &server.uri()).await;

    assert_eq!(report.len(), 2);
    assert!(!report.contains(&page_key(&server, "/doc.pdf")));
    assert_eq!(coordinator.statistics().count(PageStatus::NotHtml), 1);
}

#[tokio::test]
async fn test_zero_budget_fetches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(links(&[]), "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, _) = run(create_test_config(0, 2), &server.uri()).await;

    assert!(report.is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_report() {
    // Port 9 (discard) on localhost is not expected to be listening
    let (report, coordinator) = run(create_test_config(5, 2), "http://127.0.0.1:9/").await;

    assert!(report.is_empty());
    assert_eq!(coordinator.statistics().count(PageStatus::FetchFailed), 1);
}

#[tokio::test]
async fn test_reports_written_to_disk() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><p>Helo world</p><img src="/missing.png"></body></html>"#.to_string(),
    )
    .await;

    let (report, _) = run(create_test_config(5, 1), &server.uri()).await;

    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        report_path: dir.path().join("crawl_report.json").display().to_string(),
        summary_path: dir.path().join("crawl_summary.txt").display().to_string(),
    };
    write_reports(&report, &output).unwrap();

    let json = std::fs::read_to_string(&output.report_path).unwrap();
    assert_eq!(json, render_report(&report).unwrap());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let seed = &value[page_key(&server, "/")];
    assert_eq!(seed["spelling_issues"]["Helo"], "Hello");
    assert_eq!(seed["broken_links"][0], page_key(&server, "/missing.png"));

    let summary = std::fs::read_to_string(&output.summary_path).unwrap();
    assert!(summary.contains(" - Helo (suggestion: Hello)"));
    assert!(summary.contains(&format!("    * {}", page_key(&server, "/missing.png"))));
    assert!(summary.ends_with(
        "Total Pages Crawled: 1\nTotal Spelling Mistakes: 1\nTotal Broken Links/Images: 1\n"
    ));
}

#[tokio::test]
async fn test_in_flight_never_exceeds_worker_limit() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    let all: Vec<String> = (0..9).map(|i| format!("/p{}", i)).collect();
    let hrefs: Vec<&str> = all.iter().map(String::as_str).collect();
    mount_page(&server, "/", links(&hrefs)).await;
    for route in &all {
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(links(&[]), "text/html")
                    .set_delay(Duration::from_millis(150)),
            )
            .mount(&server)
            .await;
    }

    let mut coordinator =
        Coordinator::new(create_test_config(20, 3), &server.uri(), checker()).expect("valid seed");
    let scheduler = coordinator.scheduler().clone();
    let done = CancellationToken::new();

    let sampler = {
        let done = done.clone();
        tokio::spawn(async move {
            let mut peak = 0;
            while !done.is_cancelled() {
                peak = peak.max(scheduler.in_flight());
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            peak
        })
    };

    let report = coordinator
        .run(CancellationToken::new())
        .await
        .expect("crawl runs");
    done.cancel();
    let peak = sampler.await.unwrap();

    assert_eq!(report.len(), 10);
    assert!(peak <= 3, "peak in-flight {} exceeds 3 workers", peak);
    assert!(peak > 1, "pages were never analyzed concurrently");
}

#[tokio::test]
async fn test_politeness_delay_spaces_batches() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    // A chain forces one batch per page
    mount_page(&server, "/", links(&["/a"])).await;
    mount_page(&server, "/a", links(&["/b"])).await;
    mount_page(&server, "/b", links(&[])).await;

    let mut config = create_test_config(10, 5);
    config.crawler.politeness_delay = 200;

    let started = Instant::now();
    let (report, _) = run(config, &server.uri()).await;
    let elapsed = started.elapsed();

    assert_eq!(report.len(), 3);
    assert!(
        elapsed >= Duration::from_millis(400),
        "three batches finished in {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_disallowed_page_frees_budget_for_later_links() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/", links(&["/private", "/b", "/c"])).await;
    mount_page(&server, "/b", links(&[])).await;
    mount_page(&server, "/c", links(&[])).await;

    let (report, coordinator) = run(create_test_config(2, 1), &server.uri()).await;

    let urls: Vec<&str> = report.urls().collect();
    assert_eq!(urls, vec![page_key(&server, "/"), page_key(&server, "/b")]);
    assert_eq!(coordinator.statistics().count(PageStatus::Disallowed), 1);
}

#[tokio::test]
async fn test_failed_page_frees_budget_for_later_links() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;

    mount_page(&server, "/", links(&["/dead", "/b", "/c"])).await;
    mount_page(&server, "/b", links(&[])).await;
    mount_page(&server, "/c", links(&[])).await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (report, coordinator) = run(create_test_config(3, 1), &server.uri()).await;

    let urls: Vec<&str> = report.urls().collect();
    assert_eq!(
        urls,
        vec![
            page_key(&server, "/"),
            page_key(&server, "/b"),
            page_key(&server, "/c")
        ]
    );
    assert_eq!(coordinator.statistics().count(PageStatus::FetchFailed), 1);
}
