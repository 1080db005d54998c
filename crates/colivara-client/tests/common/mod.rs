//! Shared fixtures for the wiremock-backed API tests.

#![allow(dead_code)]

use colivara_client::ColivaraClient;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

pub fn client_for(server: &MockServer) -> ColivaraClient {
    ColivaraClient::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

pub fn collection_json(name: &str) -> Value {
    json!({
        "id": 7,
        "name": name,
        "metadata": {},
        "num_documents": 0
    })
}

pub fn document_json(name: &str, collection: &str) -> Value {
    json!({
        "id": 11,
        "name": name,
        "metadata": {"author": "vaswani"},
        "url": "https://example.com/paper.pdf",
        "num_pages": 2,
        "collection_name": collection
    })
}
