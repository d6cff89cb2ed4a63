//! Integration tests for NewsroomFetcher using wiremock
//!
//! These tests validate the HTTP fetcher's behavior with mock servers.

use presswatch::crawler::fetcher::{NewsroomFetcher, PageFetcher};
use presswatch::error::FetchError;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful fetch from mock server
#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Press Release</title></head>
<body><h1>Series B Raised</h1><p>Announcement body.</p></body>
</html>"#;

    Mock::given(method("GET"))
        .and(path("/newsroom/series-b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;

    let fetcher = NewsroomFetcher::new(10).unwrap();
    let url = format!("{}/newsroom/series-b", mock_server.uri());
    let result = fetcher.fetch_page(&url).await;

    assert!(result.is_ok(), "Fetch should succeed: {:?}", result.err());
    let page = result.unwrap();
    assert_eq!(page.url, url);
    assert!(page.html.contains("Series B Raised"));
}

/// Test that server errors trigger retries
#[tokio::test]
async fn test_server_error_retry() {
    let mock_server = MockServer::start().await;

    // Return 500 twice, then succeed
    Mock::given(method("GET"))
        .and(path("/newsroom/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/newsroom/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let fetcher = NewsroomFetcher::with_config(100, 3, Duration::from_secs(5)).unwrap();
    let url = format!("{}/newsroom/flaky", mock_server.uri());
    let result = fetcher.fetch_page(&url).await;

    assert!(result.is_ok(), "Should succeed after retries");
}

/// Test 404 does not retry
#[tokio::test]
async fn test_404_no_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/newsroom/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // Should only be called once (no retry)
        .mount(&mock_server)
        .await;

    let fetcher = NewsroomFetcher::new(100).unwrap();
    let url = format!("{}/newsroom/gone", mock_server.uri());
    let result = fetcher.fetch_page(&url).await;

    assert!(matches!(result, Err(FetchError::Unavailable(_))));
}

/// Test max retries exceeded when the server never recovers
#[tokio::test]
async fn test_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/newsroom/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = NewsroomFetcher::with_config(100, 1, Duration::from_secs(5)).unwrap();
    let url = format!("{}/newsroom/down", mock_server.uri());
    let result = fetcher.fetch_page(&url).await;

    assert!(matches!(result, Err(FetchError::MaxRetriesExceeded)));
}

/// Test forbidden responses fail immediately without retry
#[tokio::test]
async fn test_forbidden_no_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/newsroom/blocked"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = NewsroomFetcher::new(100).unwrap();
    let url = format!("{}/newsroom/blocked", mock_server.uri());
    let result = fetcher.fetch_page(&url).await;

    assert!(matches!(result, Err(FetchError::ServerError(403))));
}
