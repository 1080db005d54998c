//! Collection endpoints against a mock server.

mod common;

use colivara_client::{Metadata, PatchCollectionRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{API_KEY, client_for, collection_json};

#[tokio::test]
async fn test_create_collection_sends_empty_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/collections/"))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .and(body_json(json!({"name": "research", "metadata": {}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(collection_json("research")))
        .expect(1)
        .mount(&server)
        .await;

    let collection = client_for(&server)
        .collections()
        .create("research", None)
        .await
        .unwrap();

    assert_eq!(collection.name, "research");
    assert_eq!(collection.num_documents, 0);
}

#[tokio::test]
async fn test_create_collection_with_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/collections/"))
        .and(body_json(json!({"name": "papers", "metadata": {"team": "ml"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(collection_json("papers")))
        .expect(1)
        .mount(&server)
        .await;

    let mut metadata = Metadata::new();
    metadata.insert("team".into(), json!("ml"));

    client_for(&server)
        .collections()
        .create("papers", Some(metadata))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_collections_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/collections/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            collection_json("b"),
            collection_json("a"),
        ])))
        .mount(&server)
        .await;

    let names: Vec<String> = client_for(&server)
        .collections()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["b", "a"]);
}

#[tokio::test]
async fn test_get_update_delete_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/collections/research/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection_json("research")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/collections/research/"))
        .and(body_json(json!({"name": "archive"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection_json("archive")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/collections/archive/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server).collections();
    assert_eq!(api.get("research").await.unwrap().name, "research");

    let updated = api
        .update(
            "research",
            PatchCollectionRequest {
                name: Some("archive".into()),
                metadata: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "archive");

    api.delete("archive").await.unwrap();
}

#[tokio::test]
async fn test_collection_name_cannot_escape_its_segment() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/collections/..%2Fdocuments%2Fdelete-document%2Fx/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/documents/delete-document/x/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    client_for(&server)
        .collections()
        .delete("../documents/delete-document/x")
        .await
        .unwrap();
}
