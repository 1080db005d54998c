//! Error normalization against a mock server.

mod common;

use colivara_client::{ColivaraClient, Error};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::client_for;

#[tokio::test]
async fn test_detail_becomes_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "X"})))
        .mount(&server)
        .await;

    let err = client_for(&server).health().check().await.unwrap_err();
    assert_eq!(err.to_string(), "API Error (500): X");
    assert_eq!(err.status(), Some(500));
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_body_without_detail_falls_back_to_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/collections/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .collections()
        .get("missing")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API Error (404): Not Found");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/collections/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).collections().list().await.unwrap_err();
    assert_eq!(err.to_string(), "API Error (401): Invalid token");
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_no_response_has_undefined_status() {
    // Nothing listens on port 1.
    let client = ColivaraClient::builder()
        .api_key("k")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.health().check().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: None, .. }));
    assert!(
        err.to_string().starts_with("API Error (undefined): "),
        "unexpected message: {err}"
    );
    assert!(!client.health().is_healthy().await);
}

#[tokio::test]
async fn test_undecodable_success_body_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/collections/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).collections().list().await.unwrap_err();
    assert!(matches!(err, Error::Api { .. }));
    assert!(!err.is_client_side());
}
