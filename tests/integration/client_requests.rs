//! Request shape tests for the EPGStation client
//!
//! These tests verify what goes over the wire:
//! - Fixed paths and the isHalfWidth query
//! - The identifying User-Agent header
//! - Decoding of the status envelope next to the payload

use epgstation_plugin::client::{StationApi, USER_AGENT};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::*;

#[tokio::test]
async fn test_listing_endpoints_send_half_width_query() {
    let mock_server = MockServer::start().await;

    for route in ["/api/streams", "/api/recording", "/api/encode"] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("isHalfWidth", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);

    client.streams().await.unwrap();
    client.recording().await.unwrap();
    client.encode().await.unwrap();

    mock_server.verify().await;
}

#[tokio::test]
async fn test_count_endpoints_send_no_query() {
    let mock_server = MockServer::start().await;

    for route in ["/api/reserves/cnts", "/api/storages"] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param_is_missing("isHalfWidth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);

    client.reserve_counts().await.unwrap();
    client.storages().await.unwrap();

    mock_server.verify().await;
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/storages"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_storages_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.storages().await.unwrap();

    assert_eq!(response.payload.items.len(), 2);
    assert!(USER_AGENT.starts_with("mackerel-plugin-epgstation/"));
}

#[tokio::test]
async fn test_payloads_decoded() {
    let mock_server = MockServer::start().await;
    mount_epgstation(&mock_server).await;

    let client = client_for(&mock_server);

    let streams = client.streams().await.unwrap();
    assert!(streams.status.is_ok());
    assert_eq!(streams.payload.items.len(), 3);
    assert_eq!(streams.payload.items[2].recorded_id, Some(31));

    let counts = client.reserve_counts().await.unwrap();
    assert_eq!(counts.payload.normal, 24);

    let recording = client.recording().await.unwrap();
    assert_eq!(recording.payload.total, 1);
    assert!(recording.payload.records[0].is_recording);

    let encode = client.encode().await.unwrap();
    assert_eq!(encode.payload.running_items[0].recorded_id, Some(90));
    assert_eq!(encode.payload.wait_items.len(), 2);
}

#[tokio::test]
async fn test_status_not_validated_by_client() {
    let mock_server = MockServer::start().await;

    mount_json(
        &mock_server,
        "/api/reserves/cnts",
        serde_json::json!({ "code": 401, "message": "Unauthorized" }),
    )
    .await;

    let client = client_for(&mock_server);
    let response = client.reserve_counts().await.unwrap();

    assert_eq!(response.status.code, 401);
    assert_eq!(response.status.message.as_deref(), Some("Unauthorized"));
    assert_eq!(response.payload.normal, 0);
}
