//! Integration tests for `HttpFetcher` over a real HTTP server, using wiremock.

use std::time::Duration;

use placard::{ErrorKind, FetcherConfig, HttpFetcher, Record, RecordFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(mock_server: &MockServer) -> HttpFetcher {
    let config = FetcherConfig::builder()
        .endpoint_str(format!("{}/albums/1", mock_server.uri()))
        .expect("endpoint")
        .build();
    HttpFetcher::new(config)
}

#[tokio::test]
async fn fetch_returns_decoded_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": 1,
            "id": 1,
            "title": "quidem molestiae enim",
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let record = fetcher.fetch().await.expect("record");

    assert_eq!(
        record,
        Record {
            user_id: 1,
            id: 1,
            title: "quidem molestiae enim".to_string(),
        }
    );
}

#[tokio::test]
async fn fetch_is_safe_to_call_repeatedly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": 1,
            "id": 1,
            "title": "quidem molestiae enim",
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let first = fetcher.fetch().await.expect("first");
    let second = fetcher.fetch().await.expect("second");

    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_404_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher.fetch().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Status));
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "status 404");
}

#[tokio::test]
async fn fetch_5xx_with_record_body_is_still_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "userId": 1,
            "id": 1,
            "title": "quidem molestiae enim",
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher.fetch().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Status));
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn fetch_missing_title_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": 1,
            "id": 1,
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher.fetch().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Decode));
    assert!(err.to_string().contains("title"), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher.fetch().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Decode));
}

#[tokio::test]
async fn fetch_timeout_is_network_class() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "userId": 1,
                    "id": 1,
                    "title": "quidem molestiae enim",
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::builder()
        .endpoint_str(format!("{}/albums/1", mock_server.uri()))
        .expect("endpoint")
        .timeout(Duration::from_millis(50))
        .build();
    let fetcher = HttpFetcher::new(config);

    let err = fetcher.fetch().await.expect_err("should time out");

    assert!(err.is_timeout());
    assert_eq!(err.kind(), Some(ErrorKind::Network));
}

#[tokio::test]
async fn fetch_unreachable_server_is_network_error() {
    // Nothing listens on this port; the connection is refused.
    let config = FetcherConfig::builder()
        .endpoint_str("http://127.0.0.1:1/albums/1")
        .expect("endpoint")
        .timeout(Duration::from_secs(2))
        .build();
    let fetcher = HttpFetcher::new(config);

    let err = fetcher.fetch().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Network));
}
