//! Search, filter and embedding endpoints against a mock server.

mod common;

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use colivara_client::{
    EmbeddingTask, Error, Expand, FilterResults, FilterTarget, LookupOperator, QueryFilter,
    SearchImage, SearchRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, collection_json, document_json};

fn page_hit(document: &str, page: u32, score: f64) -> serde_json::Value {
    json!({
        "collection_name": "research",
        "collection_id": 1,
        "collection_metadata": {},
        "document_name": document,
        "document_id": 2,
        "document_metadata": {"year": 2017},
        "page_number": page,
        "raw_score": score * 20.0,
        "normalized_score": score,
        "img_base64": "AAA="
    })
}

fn embeddings_body(count: usize) -> serde_json::Value {
    let data: Vec<_> = (0..count)
        .map(|i| json!({"_object": "embedding", "embedding": [[0.1, 0.2], [0.3, 0.4]], "index": i}))
        .collect();
    json!({
        "_object": "list",
        "data": data,
        "model": "vidore/colqwen2-v1.0",
        "usage": {"prompt_tokens": 10, "total_tokens": 10}
    })
}

#[tokio::test]
async fn test_search_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search/"))
        .and(body_json(json!({"query": "q", "collection_name": "all", "top_k": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "q",
            "results": [page_hit("a", 1, 0.9), page_hit("b", 4, 0.5)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = client_for(&server).search().text("q").await.unwrap();
    assert_eq!(out.query, "q");
    assert_eq!(out.results.len(), 2);
    assert_eq!(out.results[0].document_name, "a");
    assert_eq!(out.results[1].page_number, 4);
}

#[tokio::test]
async fn test_search_with_filter_fills_empty_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search/"))
        .and(body_json(json!({
            "query": "revenue",
            "collection_name": "reports",
            "top_k": 5,
            "query_filter": {
                "on": "collection",
                "key": ["region", "year"],
                "value": "",
                "lookup": "has_keys"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query": "revenue", "results": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::new("revenue")
        .collection("reports")
        .top_k(5)
        .filter(
            QueryFilter::new(vec!["region", "year"])
                .on(FilterTarget::Collection)
                .lookup(LookupOperator::HasKeys),
        );

    let out = client_for(&server).search().query(request).await.unwrap();
    assert!(out.results.is_empty());
}

#[tokio::test]
async fn test_image_search_reads_file() {
    let server = MockServer::start().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"png bytes").unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/search-image/"))
        .and(body_json(json!({
            "img_base64": STANDARD.encode(b"png bytes"),
            "collection_name": "all",
            "top_k": 3
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [page_hit("a", 1, 1.0)]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = client_for(&server)
        .search()
        .image(SearchImage::from_path(file.path()))
        .await
        .unwrap();
    assert_eq!(out.results.len(), 1);
}

#[tokio::test]
async fn test_image_search_without_image_fails_locally() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .search()
        .image(SearchImage::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingImageSource));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_embeddings_coerce_scalar_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings/"))
        .and(body_json(json!({"input_data": ["hello"], "task": "query"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(1)))
        .expect(1)
        .mount(&server)
        .await;

    let out = client_for(&server)
        .embeddings()
        .create("hello", "Query")
        .await
        .unwrap();
    assert_eq!(out.data.len(), 1);
    assert_eq!(out.data[0].embedding.len(), 2);
    assert_eq!(out.usage.total_tokens, 10);
}

#[tokio::test]
async fn test_image_embeddings_resolve_each_item() {
    let server = MockServer::start().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"image one").unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/embeddings/"))
        .and(body_json(json!({
            "input_data": [STANDARD.encode(b"image one"), "aW1hZ2UgdHdv"],
            "task": "image"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let inputs = vec![file.path().display().to_string(), "aW1hZ2UgdHdv".to_string()];
    let out = client_for(&server)
        .embeddings()
        .create(inputs, EmbeddingTask::Image)
        .await
        .unwrap();
    assert_eq!(out.data.len(), 2);
}

#[tokio::test]
async fn test_invalid_task_sends_nothing() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .embeddings()
        .create("hello", "audio")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidTask(ref task) if task == "audio"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_documents_with_expand() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/filter/"))
        .and(query_param("expand", "pages"))
        .and(body_json(json!({
            "on": "document",
            "key": "author",
            "value": "vaswani",
            "lookup": "key_lookup"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([document_json("paper", "research")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .filter()
        .query(
            QueryFilter::new("author").value(Some(json!("vaswani"))),
            Some(Expand::Pages),
        )
        .await
        .unwrap();

    assert!(matches!(results, FilterResults::Documents(ref docs) if docs.len() == 1));
}

#[tokio::test]
async fn test_filter_collections() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/filter/"))
        .and(body_json(json!({
            "on": "collection",
            "key": "team",
            "value": "",
            "lookup": "has_key"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([collection_json("ml")])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .filter()
        .query(
            QueryFilter::new("team")
                .on(FilterTarget::Collection)
                .lookup(LookupOperator::HasKey),
            None,
        )
        .await
        .unwrap();

    assert!(matches!(results, FilterResults::Collections(ref c) if c[0].name == "ml"));
}
