use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::json;

use tats_station::domain::types::Client;
use tats_testing::auth::MockAuth;
use tats_testing::fixture::Fixture;

use crate::helpers::{MockBackend, test_server, with_auth};

#[tokio::test]
async fn should_round_trip_client_crud() {
    let backend = MockBackend::new();
    let server = test_server(backend);
    let admin = MockAuth::admin();

    // Create
    let response = with_auth(server.post("/clients"), &admin)
        .json(&json!({
            "name": "Grifo Norte SAC",
            "document": "20451234567",
            "email": "billing@norte.example",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Client = response.json();
    assert_eq!(created.name, "Grifo Norte SAC");

    // List
    let response = with_auth(server.get("/clients"), &admin).await;
    response.assert_status_ok();
    let listed: Vec<Client> = response.json();
    assert_eq!(listed.len(), 1);

    // Update
    let response = with_auth(server.put(&format!("/clients/{}", created.id)), &admin)
        .json(&json!({
            "name": "Grifo Norte S.A.C.",
            "document": "20451234567",
        }))
        .await;
    response.assert_status_ok();
    let updated: Client = response.json();
    assert_eq!(updated.name, "Grifo Norte S.A.C.");

    // Delete, then the lookup 404s
    let response = with_auth(server.delete(&format!("/clients/{}", created.id)), &admin).await;
    response.assert_status(StatusCode::NO_CONTENT);
    let response = with_auth(server.get(&format!("/clients/{}", created.id)), &admin).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_mutation_for_normal_user() {
    let server = test_server(MockBackend::new());

    let response = with_auth(server.post("/clients"), &MockAuth::normal())
        .json(&json!({
            "name": "Grifo Norte SAC",
            "document": "20451234567",
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_allow_reads_for_normal_user() {
    let backend = MockBackend::new();
    backend.seed_client();
    let server = test_server(backend);

    let response = with_auth(server.get("/clients"), &MockAuth::normal()).await;
    response.assert_status_ok();
}

#[tokio::test]
async fn should_reject_request_without_identity_headers() {
    let server = test_server(MockBackend::new());
    let response = server.get("/clients").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_client_without_required_fields() {
    let server = test_server(MockBackend::new());

    let response = with_auth(server.post("/clients"), &MockAuth::admin())
        .json(&json!({ "name": " ", "document": "20451234567" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_list_client_stations() {
    let backend = MockBackend::new();
    let client = backend.seed_client();
    backend.seed_station(client.id);
    let server = test_server(backend);

    let response = with_auth(
        server.get(&format!("/clients/{}/stations", client.id)),
        &MockAuth::normal(),
    )
    .await;
    response.assert_status_ok();
    let stations: Vec<tats_station::domain::types::Station> = response.json();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].client_id, client.id);
}

#[tokio::test]
async fn should_honor_forbidden_contract_fixture() {
    // The golden file the contract harness replays against a live service;
    // keep the in-process router on the same contract.
    let fixture = Fixture::load("contracts/http/station/clients_forbidden_for_normal_user.json");
    let server = test_server(MockBackend::new());

    let mut request = server.post(fixture["request"]["path"].as_str().unwrap());
    for (name, value) in fixture["request"]["headers"].as_object().unwrap() {
        request = request.add_header(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value.as_str().unwrap()).unwrap(),
        );
    }
    let response = request.json(&fixture["request"]["body"]).await;

    assert_eq!(
        u64::from(response.status_code().as_u16()),
        fixture["expect"]["status"].as_u64().unwrap()
    );
    assert_eq!(
        response.json::<serde_json::Value>(),
        fixture["expect"]["body"]
    );
}

#[tokio::test]
async fn should_map_upstream_failure_to_bad_gateway() {
    let backend = MockBackend::new();
    backend.fail_upstream(500);
    let server = test_server(backend);

    let response = with_auth(server.get("/clients"), &MockAuth::normal()).await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<serde_json::Value>()["kind"],
        "BACKEND_REJECTED"
    );
}
