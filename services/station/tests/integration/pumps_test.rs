use axum::http::StatusCode;
use serde_json::json;

use tats_station::domain::types::Pump;
use tats_testing::auth::MockAuth;

use crate::helpers::{MockBackend, test_server, with_auth};

#[tokio::test]
async fn should_create_and_list_pumps() {
    let backend = MockBackend::new();
    let client = backend.seed_client();
    let station = backend.seed_station(client.id);
    let server = test_server(backend);
    let admin = MockAuth::admin();

    let response = with_auth(
        server.post(&format!("/stations/{}/pumps", station.id)),
        &admin,
    )
    .json(&json!({
        "address": "2",
        "identifier": "pumpAddress",
        "nozzles": [
            { "number": 1, "productId": 10 },
            { "number": 2, "productId": 11 },
        ],
    }))
    .await;
    response.assert_status(StatusCode::CREATED);
    let created: Pump = response.json();
    assert_eq!(created.nozzles.len(), 2);

    let response = with_auth(
        server.get(&format!("/stations/{}/pumps", station.id)),
        &admin,
    )
    .await;
    response.assert_status_ok();
    let pumps: Vec<Pump> = response.json();
    assert_eq!(pumps.len(), 1);
}

#[tokio::test]
async fn should_reject_unknown_identifier_mode() {
    let backend = MockBackend::new();
    let client = backend.seed_client();
    let station = backend.seed_station(client.id);
    let server = test_server(backend);

    let response = with_auth(
        server.post(&format!("/stations/{}/pumps", station.id)),
        &MockAuth::admin(),
    )
    .json(&json!({
        "address": "2",
        "identifier": "hose",
        "nozzles": [{ "number": 1, "productId": 10 }],
    }))
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["kind"],
        "INVALID_IDENTIFIER"
    );
}

#[tokio::test]
async fn should_reject_pump_without_nozzles() {
    let backend = MockBackend::new();
    let client = backend.seed_client();
    let station = backend.seed_station(client.id);
    let server = test_server(backend);

    let response = with_auth(
        server.post(&format!("/stations/{}/pumps", station.id)),
        &MockAuth::admin(),
    )
    .json(&json!({
        "address": "2",
        "identifier": "nozzle",
        "nozzles": [],
    }))
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["kind"],
        "INVALID_NOZZLES"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_station() {
    let server = test_server(MockBackend::new());

    let response = with_auth(server.get("/stations/999/pumps"), &MockAuth::normal()).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["kind"],
        "STATION_NOT_FOUND"
    );
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_pump() {
    let backend = MockBackend::new();
    let client = backend.seed_client();
    let station = backend.seed_station(client.id);
    let server = test_server(backend);

    let response = with_auth(
        server.put(&format!("/stations/{}/pumps/999", station.id)),
        &MockAuth::admin(),
    )
    .json(&json!({
        "address": "2",
        "identifier": "nozzle",
        "nozzles": [{ "number": 1, "productId": 10 }],
    }))
    .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "PUMP_NOT_FOUND");
}
