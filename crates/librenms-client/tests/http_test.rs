#![allow(clippy::unwrap_used)]
// HTTP-level tests for `LibreNmsClient` over the reqwest transport, using wiremock.

use std::error::Error as _;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use librenms_client::{
    AlertRuleCreateRequest, AlertsQuery, ClientBuilder, DeviceUpdateRequest, LibreNmsClient,
    LibreNmsError, LocationUpdateRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LibreNmsClient) {
    let server = MockServer::start().await;
    let client = LibreNmsClient::new(server.uri(), "test-token").unwrap();
    (server, client)
}

// ── Envelope ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_auth_and_accept_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices"))
        .and(header("X-Auth-Token", "test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 1,
            "devices": [{ "device_id": 1, "hostname": "web01", "status": 1, "ignore": false }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.get_devices(None).await.unwrap();
    assert_eq!(response.devices[0].hostname, "web01");
    assert!(response.devices[0].status.get());
}

#[tokio::test]
async fn test_api_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "Device ghost does not exist"
        })))
        .mount(&server)
        .await;

    let result = client.get_device("ghost").await;
    match result {
        Err(LibreNmsError::Api {
            status,
            status_text,
            message,
            url,
            ..
        }) => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(message, "Device ghost does not exist");
            assert_eq!(url, format!("{}/api/v0/devices/ghost", server.uri()));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/rules"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.get_alert_rules().await;
    match result {
        Err(LibreNmsError::Api { status, message, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "500 Internal Server Error");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v0/rules/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let envelope = client.delete_alert_rule(3).await.unwrap();
    assert_eq!(envelope.status, "");
}

#[tokio::test]
async fn test_connection_refused() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ClientBuilder::new(format!("http://127.0.0.1:{port}/"), "test-token")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.get_devices(None).await.unwrap_err();
    assert!(
        matches!(err, LibreNmsError::Transport { .. }),
        "expected Transport error, got: {err:?}"
    );

    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    let chain = chain.join(": ").to_lowercase();
    assert!(chain.contains("connection refused"), "{chain}");
}

// ── Resources ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_device_payload() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v0/devices/web01"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "field": ["disabled", "purpose"],
            "data": [0, "edge router"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "Device fields have been updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = DeviceUpdateRequest::new()
        .set_disabled(false)
        .set_purpose("edge router");
    let envelope = client.update_device("web01", &update).await.unwrap();
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn test_update_location_payload() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v0/locations/4"))
        .and(body_json(json!({ "lat": 37.5, "lng": -122.25 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let update = LocationUpdateRequest::new()
        .set_latitude(37.5)
        .set_longitude(-122.25);
    client.update_location(4, &update).await.unwrap();
}

#[tokio::test]
async fn test_get_location_with_string_coordinates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/location/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "get_location": {
                "id": 4,
                "location": "Lab",
                "lat": "37.5",
                "lng": "-122.25",
                "fixed_coordinates": true,
                "timestamp": "2024-05-01 10:00:00"
            },
            "count": 1
        })))
        .mount(&server)
        .await;

    let response = client.get_location(4).await.unwrap();
    assert_eq!(response.location.name, "Lab");
    assert!((response.location.latitude.get() - 37.5).abs() < f64::EPSILON);
    assert!(response.location.fixed_coordinates.get());
}

#[tokio::test]
async fn test_alerts_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/alerts"))
        .and(query_param("state", "0"))
        .and(query_param("severity", "critical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 0,
            "alerts": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = AlertsQuery::new().set_state(0).set_severity("critical");
    let response = client.get_alerts(Some(&query)).await.unwrap();
    assert!(response.alerts.is_empty());
}

#[tokio::test]
async fn test_services_are_flattened() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/services/web01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "",
            "count": 1,
            "services": [[
                { "service_id": 1, "service_name": "http", "service_type": "http" },
                { "service_id": 2, "service_name": "ping", "service_type": "icmp" },
                { "service_id": 3, "service_name": "ssh", "service_type": "ssh" }
            ]]
        })))
        .mount(&server)
        .await;

    let response = client.get_services_for_host("web01").await.unwrap();
    assert_eq!(response.envelope.count, 3);
    let names: Vec<&str> = response.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["http", "ping", "ssh"]);
}

#[tokio::test]
async fn test_create_alert_rule_for_all_devices() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/rules"))
        .and(body_json(json!({
            "builder": "",
            "devices": [-1],
            "groups": [],
            "locations": [],
            "name": "Device down",
            "severity": "critical"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AlertRuleCreateRequest::new("Device down", "critical");
    client.create_alert_rule(&request).await.unwrap();
}
