//! End-to-end scan tests against a mock newsroom

use std::collections::HashSet;
use std::path::PathBuf;

use presswatch::config::Config;
use presswatch::crawler::Scanner;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.newsroom.base_url = format!("{}/newsroom", server.uri());
    config.fetch.rate_limit = 100;
    config.fetch.max_retries = 0;
    config.storage.known_path = PathBuf::from("unused/known.json");
    config.storage.snapshot_path = PathBuf::from("unused/snapshot.json");
    config
}

fn listing(slugs: &[&str]) -> String {
    let anchors: String = slugs
        .iter()
        .map(|s| format!(r#"<li><a href="/newsroom/{s}">{s}</a></li>"#))
        .collect();
    format!("<html><body><ul>{anchors}</ul></body></html>")
}

fn detail(title: &str, date_line: &str) -> String {
    format!(
        "<html><body><article><h1>{title}</h1><p>{date_line}</p>\
         <p>A press release body long enough to qualify as the description text.</p>\
         </article></body></html>"
    )
}

async fn mount_page(server: &MockServer, page: Option<u32>, body: String) {
    let mock = Mock::given(method("GET")).and(path("/newsroom"));
    let mock = match page {
        None => mock.and(query_param_is_missing("page")),
        Some(n) => mock.and(query_param("page", n.to_string())),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, slug: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/newsroom/{slug}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Two listing pages where the second repeats the first; one dated and
/// one undated detail page; empty known set
#[tokio::test]
async fn test_scan_end_to_end() {
    let server = MockServer::start().await;

    mount_page(&server, None, listing(&["funding-round", "new-office"])).await;
    mount_page(&server, Some(2), listing(&["funding-round", "new-office"])).await;
    mount_detail(
        &server,
        "funding-round",
        detail("Funding Round Closed", "Announced March 3, 2023 by the company."),
    )
    .await;
    mount_detail(
        &server,
        "new-office",
        detail("New Office Opened", "No date given in this one."),
    )
    .await;

    let scanner = Scanner::new(test_config(&server)).unwrap();
    let outcome = scanner.run(&HashSet::new()).await.unwrap();

    assert_eq!(outcome.report.total_records, 2);
    assert_eq!(outcome.report.new_records, 2);
    assert_eq!(outcome.report.pages_visited, 2);
    assert!(outcome.report.skipped.is_empty());

    // Dated record sorts ahead of the undated one
    assert_eq!(outcome.records[0].record.title, "Funding Round Closed");
    assert_eq!(outcome.records[0].record.date, "2023-03-03");
    assert_eq!(outcome.records[1].record.title, "New Office Opened");
    assert_eq!(outcome.records[1].record.date, "");
    assert_eq!(outcome.new_positions, vec![0, 1]);
}

/// The walk ends at the first later page that repeats earlier links
#[tokio::test]
async fn test_pagination_stops_on_exhausted_page() {
    let server = MockServer::start().await;

    mount_page(&server, None, listing(&["a", "b"])).await;
    mount_page(&server, Some(2), listing(&["c"])).await;
    mount_page(&server, Some(3), listing(&["a"])).await;
    // Page 4 exists but must never be requested
    Mock::given(method("GET"))
        .and(path("/newsroom"))
        .and(query_param("page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&["d"])))
        .expect(0)
        .mount(&server)
        .await;

    for slug in ["a", "b", "c"] {
        mount_detail(&server, slug, detail(slug, "January 1, 2024")).await;
    }

    let scanner = Scanner::new(test_config(&server)).unwrap();
    let outcome = scanner.run(&HashSet::new()).await.unwrap();

    assert_eq!(outcome.report.total_records, 3);
    assert_eq!(outcome.report.pages_visited, 3);
}

/// An unreachable newsroom yields an empty run, not an error
#[tokio::test]
async fn test_unreachable_listing_yields_empty_run() {
    let server = MockServer::start().await;

    let scanner = Scanner::new(test_config(&server)).unwrap();
    let outcome = scanner.run(&HashSet::new()).await.unwrap();

    assert_eq!(outcome.report.total_records, 0);
    assert_eq!(outcome.report.new_records, 0);
    assert_eq!(outcome.report.pages_visited, 0);
}

/// A failing detail page is skipped while the rest of the batch survives
#[tokio::test]
async fn test_broken_detail_page_is_skipped() {
    let server = MockServer::start().await;

    mount_page(&server, None, listing(&["works", "broken"])).await;
    mount_page(&server, Some(2), listing(&[])).await;
    mount_detail(&server, "works", detail("Works", "May 5, 2024")).await;
    // "broken" is never mounted, so it 404s

    let scanner = Scanner::new(test_config(&server)).unwrap();
    let outcome = scanner.run(&HashSet::new()).await.unwrap();

    assert_eq!(outcome.report.total_records, 1);
    assert_eq!(outcome.records[0].record.title, "Works");
    assert_eq!(outcome.report.skipped.len(), 1);
    assert!(outcome.report.skipped[0].url.ends_with("/newsroom/broken"));
}

/// Previously known links are flagged old; only novelties count
#[tokio::test]
async fn test_known_records_not_counted_as_new() {
    let server = MockServer::start().await;

    mount_page(&server, None, listing(&["old-story", "fresh-story"])).await;
    mount_page(&server, Some(2), listing(&[])).await;
    mount_detail(&server, "old-story", detail("Old Story", "April 1, 2024")).await;
    mount_detail(&server, "fresh-story", detail("Fresh Story", "April 2, 2024")).await;

    let known: HashSet<String> = [format!("{}/newsroom/old-story", server.uri())]
        .into_iter()
        .collect();

    let scanner = Scanner::new(test_config(&server)).unwrap();
    let outcome = scanner.run(&known).await.unwrap();

    assert_eq!(outcome.report.total_records, 2);
    assert_eq!(outcome.report.new_records, 1);

    let fresh = outcome
        .records
        .iter()
        .find(|r| r.record.title == "Fresh Story")
        .unwrap();
    assert!(fresh.is_new);
    let old = outcome
        .records
        .iter()
        .find(|r| r.record.title == "Old Story")
        .unwrap();
    assert!(!old.is_new);
}
