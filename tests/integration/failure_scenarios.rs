//! Failure tests for a collection cycle
//!
//! Any failing endpoint must abort the whole cycle:
//! - Application error codes on HTTP 200
//! - Error bodies on HTTP 5xx
//! - Malformed JSON
//! - Unreachable server

use assert_matches::assert_matches;
use epgstation_plugin::{
    EpgStationClient, FetchError, MetricAggregator,
    client::{ClientError, Endpoint},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::*;

#[tokio::test]
async fn test_application_error_code_fails_cycle() {
    let mock_server = MockServer::start().await;
    mount_epgstation_with(
        &mock_server,
        Some((
            "/api/encode",
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 500,
                "message": "encode manager is not ready",
                "errors": "timeout"
            })),
        )),
    )
    .await;

    let result = MetricAggregator::new(client_for(&mock_server))
        .fetch_metrics()
        .await;

    let err = result.unwrap_err();
    assert_matches!(&err, FetchError::Application { endpoint: Endpoint::Encode, .. });
    assert_eq!(
        err.to_string(),
        "failed to get encode: 500: encode manager is not ready, timeout"
    );
}

#[tokio::test]
async fn test_http_error_body_carries_code() {
    let mock_server = MockServer::start().await;
    mount_epgstation_with(
        &mock_server,
        Some((
            "/api/storages",
            ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "code": 500,
                "message": "Internal Server Error"
            })),
        )),
    )
    .await;

    let err = MetricAggregator::new(client_for(&mock_server))
        .fetch_metrics()
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::Application { endpoint: Endpoint::Storages, status } => {
        assert_eq!(status.code, 500);
        assert_eq!(status.errors, None);
    });
}

#[tokio::test]
async fn test_malformed_json_fails_cycle() {
    let mock_server = MockServer::start().await;
    mount_epgstation_with(
        &mock_server,
        Some((
            "/api/streams",
            ResponseTemplate::new(200).set_body_string("{invalid json"),
        )),
    )
    .await;

    let err = MetricAggregator::new(client_for(&mock_server))
        .fetch_metrics()
        .await
        .unwrap_err();

    assert_matches!(
        err,
        FetchError::Client {
            endpoint: Endpoint::Streams,
            source: ClientError::Decode(_)
        }
    );
}

#[tokio::test]
async fn test_not_found_page_fails_cycle() {
    let mock_server = MockServer::start().await;
    mount_epgstation_with(
        &mock_server,
        Some((
            "/api/reserves/cnts",
            ResponseTemplate::new(404).set_body_string("Cannot GET /api/reserves/cnts"),
        )),
    )
    .await;

    let err = MetricAggregator::new(client_for(&mock_server))
        .fetch_metrics()
        .await
        .unwrap_err();

    assert_eq!(err.endpoint(), Endpoint::ReserveCounts);
}

#[tokio::test]
async fn test_unreachable_server_fails_cycle() {
    // Don't start a mock server - EPGStation will be unreachable
    let client = EpgStationClient::new("127.0.0.1", 9).unwrap();

    let err = MetricAggregator::new(client)
        .fetch_metrics()
        .await
        .unwrap_err();

    assert_matches!(
        err,
        FetchError::Client {
            endpoint: Endpoint::Streams,
            source: ClientError::Transport(_)
        }
    );
}

#[tokio::test]
async fn test_later_endpoints_not_requested_after_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/streams"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "code": 1, "items": [] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/storages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_storages_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = MetricAggregator::new(client_for(&mock_server))
        .fetch_metrics()
        .await;

    assert!(result.is_err());
    mock_server.verify().await;
}
