//! Integration tests for the scan pipeline
//!
//! These tests use wiremock to stand in for the friends and users services
//! and run listing traversal, retries and full scans end-to-end.

use chrono::{Duration, Utc};
use friend_sift::api::FriendsClient;
use friend_sift::config::{ApiConfig, Config, PacingConfig, RetryConfig, UserAgentConfig};
use friend_sift::output::CollectingObserver;
use friend_sift::scan::{ScanOptions, Scanner};
use friend_sift::SiftError;
use serde_json::json;
use std::time::{Duration as StdDuration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBJECT: u64 = 42;

/// Creates a test configuration pointing every service at the mock server
fn create_test_config(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            friends_base_url: base_url.to_string(),
            users_base_url: base_url.to_string(),
            profile_base_url: "https://www.roblox.com".to_string(),
            page_size: 100,
            timeout_secs: 5,
        },
        user_agent: UserAgentConfig::default(),
        retry: RetryConfig {
            max_retries: 6,
            base_delay_ms: 1, // Very short for testing
            max_jitter_ms: 1,
        },
        pacing: PacingConfig {
            page_delay_ms: 0,
            candidate_delay_ms: 0,
        },
    }
}

/// Test configuration with explicit backoff and pacing
fn create_paced_config(base_url: &str, retry: RetryConfig, pacing: PacingConfig) -> Config {
    Config {
        retry,
        pacing,
        ..create_test_config(base_url)
    }
}

/// Serves a single-page friends listing for the subject
async fn mount_listing(server: &MockServer, friends: &[(u64, &str)]) {
    let data: Vec<_> = friends
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{}/friends", SUBJECT)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "previousPageCursor": null,
                "nextPageCursor": null,
                "data": data
            })),
        )
        .mount(server)
        .await;
}

async fn mount_count(server: &MockServer, id: u64, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{}/friends/count", id)))
        .respond_with(response)
        .mount(server)
        .await;
}

fn count_body(count: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "count": count }))
}

fn user_body(id: u64, created: chrono::DateTime<Utc>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": id,
        "name": format!("user{}", id),
        "created": created.to_rfc3339(),
        "isBanned": false
    }))
}

#[tokio::test]
async fn test_pagination_follows_cursors_in_order() {
    let mock_server = MockServer::start().await;
    let listing = format!("/v1/users/{}/friends", SUBJECT);

    // Cursor-specific pages are mounted first so they win over the first page
    Mock::given(method("GET"))
        .and(path(listing.clone()))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": "page-3",
            "data": [{"id": 3, "name": "c"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(listing.clone()))
        .and(query_param("cursor", "page-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(listing))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": "page-2",
            "data": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FriendsClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let friends = client.fetch_all_friends(SUBJECT).await.expect("listing failed");

    let ids: Vec<u64> = friends.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(friends[2].name, "c");
}

#[tokio::test]
async fn test_rate_limit_retries_six_times_then_fails() {
    let mock_server = MockServer::start().await;

    // One attempt plus six retries
    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{}/friends", SUBJECT)))
        .respond_with(ResponseTemplate::new(429))
        .expect(7)
        .mount(&mock_server)
        .await;

    let client = FriendsClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let result = client.fetch_all_friends(SUBJECT).await;

    match result {
        Err(SiftError::HttpStatus { status, .. }) => assert_eq!(status, 429),
        other => panic!("Expected HTTP 429 error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_errors_recovered_by_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/7/friends/count"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    mount_count(&mock_server, 7, count_body(12)).await;

    let client = FriendsClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let count = client.fetch_friend_count(7).await.expect("count failed");
    assert_eq!(count, 12);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_non_retryable_status_not_retried() {
    let mock_server = MockServer::start().await;

    mount_count(&mock_server, 7, ResponseTemplate::new(404)).await;

    let client = FriendsClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let result = client.fetch_friend_count(7).await;

    assert!(matches!(result, Err(SiftError::HttpStatus { status: 404, .. })));
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_transport_failure_returns_error_after_retries() {
    // Nothing listens on port 1
    let client = FriendsClient::new(&create_test_config("http://127.0.0.1:1")).unwrap();
    let result = client.fetch_friend_count(7).await;

    assert!(
        matches!(result, Err(SiftError::Transport { .. })),
        "Expected transport error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_listing_with_invalid_json_aborts_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{}/friends", SUBJECT)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let result = scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await;

    assert!(matches!(result, Err(SiftError::Parse { .. })));
    assert!(observer.last_status().unwrap().starts_with("Error: "));
    assert!(observer.results.is_empty());
}

#[tokio::test]
async fn test_listing_without_data_is_empty_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{}/friends", SUBJECT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": []})))
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let summary = scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await
        .expect("scan failed");

    assert_eq!(summary.friends_listed, 0);
    assert_eq!(observer.last_status(), Some("Scan complete"));
}

#[tokio::test]
async fn test_scan_threshold_three_scenario() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(1, "one"), (2, "two"), (3, "three")]).await;
    mount_count(&mock_server, 1, count_body(2)).await;
    mount_count(&mock_server, 2, count_body(5)).await;
    mount_count(&mock_server, 3, ResponseTemplate::new(500)).await;

    // Age filtering is off, so account details are never requested
    Mock::given(method("GET"))
        .and(path("/v1/users/1"))
        .respond_with(user_body(1, Utc::now()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let summary = scanner
        .scan(SUBJECT, ScanOptions::new(3, 0.0), &mut observer)
        .await
        .expect("scan failed");

    assert_eq!(summary.friends_listed, 3);
    assert_eq!(summary.results.ids(), vec![1]);
    assert_eq!(observer.results.ids(), vec![1]);

    let first = &summary.results.as_slice()[0];
    assert_eq!(first.friend_count, Some(2));
    assert_eq!(first.age_years, None);
}

#[tokio::test]
async fn test_scan_threshold_zero_keeps_unknown_count() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(1, "one")]).await;
    mount_count(&mock_server, 1, ResponseTemplate::new(404)).await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let summary = scanner
        .scan(SUBJECT, ScanOptions::new(0, 0.0), &mut observer)
        .await
        .expect("scan failed");

    assert_eq!(summary.results.ids(), vec![1]);
    assert_eq!(summary.results.as_slice()[0].friend_count, None);
}

#[tokio::test]
async fn test_scan_malformed_count_treated_as_unknown() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(1, "one")]).await;
    mount_count(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_json(json!({"total": 1})),
    )
    .await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let summary = scanner
        .scan(SUBJECT, ScanOptions::new(3, 0.0), &mut observer)
        .await
        .expect("scan failed");

    assert!(summary.results.is_empty());
    assert_eq!(observer.last_status(), Some("Scan complete"));
}

#[tokio::test]
async fn test_scan_age_filter() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        &[(1, "young"), (2, "old"), (3, "unknown"), (4, "popular")],
    )
    .await;
    for id in 1..=3 {
        mount_count(&mock_server, id, count_body(0)).await;
    }
    mount_count(&mock_server, 4, count_body(50)).await;

    Mock::given(method("GET"))
        .and(path("/v1/users/1"))
        .respond_with(user_body(1, Utc::now() - Duration::days(30)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/users/2"))
        .respond_with(user_body(2, Utc::now() - Duration::days(3650)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/users/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    // Rejected on friend count before any age lookup
    Mock::given(method("GET"))
        .and(path("/v1/users/4"))
        .respond_with(user_body(4, Utc::now()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    let summary = scanner
        .scan(SUBJECT, ScanOptions::new(3, 1.0), &mut observer)
        .await
        .expect("scan failed");

    assert_eq!(summary.results.ids(), vec![1]);
    let young = &summary.results.as_slice()[0];
    assert_eq!(young.friend_count, Some(0));
    let age = young.age_years.expect("age should be recorded");
    assert!(age > 0.07 && age < 0.09, "unexpected age {}", age);
}

#[tokio::test]
async fn test_scan_emits_in_listing_order() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(5, "e"), (3, "c"), (9, "i")]).await;
    for id in [5, 3, 9] {
        mount_count(&mock_server, id, count_body(1)).await;
    }

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();
    scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await
        .expect("scan failed");

    assert_eq!(observer.results.ids(), vec![5, 3, 9]);
    assert_eq!(
        observer.statuses,
        vec![
            "Fetching friends...",
            "Found 3 friends - checking each...",
            "Checking 1/3: e",
            "Checking 2/3: c",
            "Checking 3/3: i",
            "Scan complete",
        ]
    );
}

#[tokio::test]
async fn test_second_scan_starts_with_fresh_results() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(1, "one")]).await;
    mount_count(&mock_server, 1, count_body(0)).await;

    let scanner = Scanner::new(&create_test_config(&mock_server.uri())).unwrap();
    let mut observer = CollectingObserver::new();

    scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await
        .expect("first scan failed");
    scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await
        .expect("second scan failed");

    assert_eq!(observer.results.ids(), vec![1]);
}

#[tokio::test]
async fn test_pages_are_paced() {
    let mock_server = MockServer::start().await;
    let listing = format!("/v1/users/{}/friends", SUBJECT);

    for (cursor, next) in [("p2", json!("p3")), ("p3", json!(null))] {
        Mock::given(method("GET"))
            .and(path(listing.clone()))
            .and(query_param("cursor", cursor))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nextPageCursor": next,
                "data": []
            })))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(listing))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": "p2",
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let config = create_paced_config(
        &mock_server.uri(),
        RetryConfig::default(),
        PacingConfig {
            page_delay_ms: 40,
            candidate_delay_ms: 0,
        },
    );
    let client = FriendsClient::new(&config).unwrap();

    let started = Instant::now();
    client.fetch_all_friends(SUBJECT).await.expect("listing failed");

    // Two pauses for three pages
    assert!(started.elapsed() >= StdDuration::from_millis(80));
}

#[tokio::test]
async fn test_single_page_has_no_pause() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, &[]).await;

    let config = create_paced_config(
        &mock_server.uri(),
        RetryConfig::default(),
        PacingConfig {
            page_delay_ms: 2_000,
            candidate_delay_ms: 0,
        },
    );
    let client = FriendsClient::new(&config).unwrap();

    let started = Instant::now();
    client.fetch_all_friends(SUBJECT).await.expect("listing failed");

    assert!(started.elapsed() < StdDuration::from_millis(2_000));
}

#[tokio::test]
async fn test_candidates_are_paced() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[(1, "a"), (2, "b"), (3, "c")]).await;
    for id in [1, 2, 3] {
        mount_count(&mock_server, id, count_body(0)).await;
    }

    let config = create_paced_config(
        &mock_server.uri(),
        RetryConfig::default(),
        PacingConfig {
            page_delay_ms: 0,
            candidate_delay_ms: 30,
        },
    );
    let scanner = Scanner::new(&config).unwrap();
    let mut observer = CollectingObserver::new();

    let started = Instant::now();
    scanner
        .scan(SUBJECT, ScanOptions::default(), &mut observer)
        .await
        .expect("scan failed");

    assert!(started.elapsed() >= StdDuration::from_millis(90));
    assert_eq!(observer.results.ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_status_retries_back_off_exponentially() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/7/friends/count"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(3)
        .expect(3)
        .mount(&mock_server)
        .await;
    mount_count(&mock_server, 7, count_body(4)).await;

    let config = create_paced_config(
        &mock_server.uri(),
        RetryConfig {
            max_retries: 6,
            base_delay_ms: 10,
            max_jitter_ms: 0,
        },
        PacingConfig::default(),
    );
    let client = FriendsClient::new(&config).unwrap();

    let started = Instant::now();
    let count = client.fetch_friend_count(7).await.expect("count failed");

    // 10ms + 20ms + 40ms
    assert!(started.elapsed() >= StdDuration::from_millis(70));
    assert_eq!(count, 4);
}

#[tokio::test]
async fn test_transport_retries_back_off_exponentially() {
    let config = create_paced_config(
        "http://127.0.0.1:1",
        RetryConfig {
            max_retries: 3,
            base_delay_ms: 10,
            max_jitter_ms: 500,
        },
        PacingConfig::default(),
    );
    let client = FriendsClient::new(&config).unwrap();

    let started = Instant::now();
    let result = client.fetch_friend_count(7).await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(SiftError::Transport { .. })));
    assert!(elapsed >= StdDuration::from_millis(70));
}
