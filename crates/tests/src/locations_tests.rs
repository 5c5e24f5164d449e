use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::AppErrorKind;

use crate::common::*;

#[tokio::test]
async fn locations_are_fetched_and_normalised() {
    let mock = spawn_mock().await;
    mock.respond(LOCATIONS, StatusCode::OK, sample_locations());

    let locations = mock.api().locations().await.unwrap();
    let ids: Vec<&str> = locations.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(locations[2].department, "Y");
}

#[tokio::test]
async fn malformed_location_payload_yields_empty_list() {
    let mock = spawn_mock().await;
    mock.respond(LOCATIONS, StatusCode::OK, json!({"data": "maintenance"}));

    let locations = mock.api().locations().await.unwrap();
    assert!(locations.is_empty());
}

#[tokio::test]
async fn every_request_carries_a_fresh_request_id() {
    let mock = spawn_mock().await;
    mock.respond(LOCATIONS, StatusCode::OK, json!([]));
    let api = mock.api();

    api.locations().await.unwrap();
    api.locations().await.unwrap();

    let ids: Vec<String> = mock
        .requests_to(LOCATIONS)
        .into_iter()
        .map(|r| r.request_id.expect("request id header"))
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(uuid::Uuid::parse_str(&ids[0]).is_ok());
}

#[tokio::test]
async fn server_error_keeps_server_message() {
    let mock = spawn_mock().await;
    mock.respond(
        LOCATIONS,
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"message": "Database unavailable"}),
    );

    let err = mock.api().locations().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(err.message, "Database unavailable");
}

#[tokio::test]
async fn wizard_loads_locations_through_the_backend() {
    let mock = spawn_mock().await;
    mock.respond(LOCATIONS, StatusCode::OK, sample_locations());
    let mut wizard = signed_in_wizard();
    wizard.set_locations(Vec::new());

    wizard.load_locations(&mock.api()).await.unwrap();

    assert_eq!(wizard.locations().len(), 3);
    let names: Vec<&str> = wizard
        .filtered_locations()
        .into_iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Store A", "Store B", "Store C"]);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client::ApiClient::new(&shared_types::ApiConfig {
        base_url: format!("http://{addr}"),
        request_timeout_secs: 2,
    })
    .unwrap();
    let err = api.locations().await.unwrap_err();
    assert!(err.is_transport(), "expected a transport error, got {err:?}");
}
