//! Request and response types for the ColiVara API.
//!
//! These types mirror the server's API contract. Request structs carry the
//! wire defaults (see [`crate::defaults`]) so a value built with `new` can be
//! serialized and sent as-is.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults::{ALL_COLLECTIONS, DEFAULT_COLLECTION, DEFAULT_TOP_K};
use crate::error::{Error, Result};

/// Free-form metadata attached to collections and documents.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Collections
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// Collection name, unique per account.
    pub name: String,
    /// Metadata, sent as `{}` when empty.
    #[serde(default)]
    pub metadata: Metadata,
}

impl CreateCollectionRequest {
    /// Create a request with empty metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    /// Replace the metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Partial update of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchCollectionRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A collection as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub num_documents: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Document to insert or replace.
///
/// Exactly one content source is expected: a remote `url`, inline `base64`
/// content, or a local `document_path` that is read and encoded before the
/// request is sent. A path takes precedence over inline base64.
#[derive(Debug, Clone)]
pub struct UpsertDocument {
    pub name: String,
    pub metadata: Metadata,
    pub collection_name: String,
    pub url: Option<String>,
    pub base64: Option<String>,
    pub document_path: Option<PathBuf>,
    /// Ask the server to process the document before responding.
    pub wait: bool,
    /// Fetch `url` through the service's proxy.
    pub use_proxy: bool,
}

impl UpsertDocument {
    /// Create an upsert targeting the default collection with no content yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
            collection_name: DEFAULT_COLLECTION.to_string(),
            url: None,
            base64: None,
            document_path: None,
            wait: false,
            use_proxy: false,
        }
    }

    pub fn collection(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn base64(mut self, content: impl Into<String>) -> Self {
        self.base64 = Some(content.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }
}

/// Wire body of `POST /v1/documents/upsert-document/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDocumentRequest {
    pub name: String,
    pub metadata: Metadata,
    pub collection_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    pub wait: bool,
    pub use_proxy: bool,
}

/// Partial update of a document.
///
/// Content sources are optional here; when a `document_path` is given it is
/// read and encoded like an upsert.
#[derive(Debug, Clone)]
pub struct PatchDocument {
    pub collection_name: String,
    pub name: Option<String>,
    pub metadata: Option<Metadata>,
    pub url: Option<String>,
    pub base64: Option<String>,
    pub document_path: Option<PathBuf>,
    pub use_proxy: bool,
}

impl Default for PatchDocument {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION.to_string(),
            name: None,
            metadata: None,
            url: None,
            base64: None,
            document_path: None,
            use_proxy: false,
        }
    }
}

/// Wire body of `PATCH /v1/documents/{name}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchDocumentRequest {
    pub collection_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    pub use_proxy: bool,
}

/// One rendered page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    pub img_base64: String,
    /// 1-based page number.
    pub page_number: u32,
}

/// A document as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    pub num_pages: i64,
    pub collection_name: String,
    /// Present only when requested with [`Expand::Pages`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageOut>>,
}

/// Plain acknowledgement message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub detail: String,
}

/// Result of an upsert.
///
/// With `wait = true` the server answers with the processed document;
/// otherwise it acknowledges the request and processes it in the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpsertOutcome {
    Processed(DocumentOut),
    Accepted(GenericMessage),
}

impl UpsertOutcome {
    /// The processed document, if the server returned one.
    pub fn document(&self) -> Option<&DocumentOut> {
        match self {
            UpsertOutcome::Processed(doc) => Some(doc),
            UpsertOutcome::Accepted(_) => None,
        }
    }
}

/// Expansion flags for document reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expand {
    /// Include each document's ordered page sequence.
    Pages,
}

impl Expand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Expand::Pages => "pages",
        }
    }
}

impl FromStr for Expand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pages" => Ok(Expand::Pages),
            other => Err(Error::Config(format!("unknown expand flag: {other}"))),
        }
    }
}

/// Query parameters for document get and list calls.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentQuery {
    pub collection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Expand>,
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION.to_string(),
            expand: None,
        }
    }
}

impl DocumentQuery {
    pub fn collection(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            expand: None,
        }
    }

    pub fn with_pages(mut self) -> Self {
        self.expand = Some(Expand::Pages);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filters
// ─────────────────────────────────────────────────────────────────────────────

/// Entity class a filter applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTarget {
    #[default]
    Document,
    Collection,
}

/// Metadata lookup operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOperator {
    /// Exact match of `key` against `value`.
    #[default]
    KeyLookup,
    Contains,
    ContainedBy,
    HasKey,
    HasKeys,
    HasAnyKeys,
}

impl FromStr for LookupOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key_lookup" => Ok(Self::KeyLookup),
            "contains" => Ok(Self::Contains),
            "contained_by" => Ok(Self::ContainedBy),
            "has_key" => Ok(Self::HasKey),
            "has_keys" => Ok(Self::HasKeys),
            "has_any_keys" => Ok(Self::HasAnyKeys),
            other => Err(Error::Config(format!("unknown lookup operator: {other}"))),
        }
    }
}

impl FromStr for FilterTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "document" => Ok(Self::Document),
            "collection" => Ok(Self::Collection),
            other => Err(Error::Config(format!("unknown filter target: {other}"))),
        }
    }
}

/// One metadata key or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterKey {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        FilterKey::Single(key.to_string())
    }
}

impl From<String> for FilterKey {
    fn from(key: String) -> Self {
        FilterKey::Single(key)
    }
}

impl From<Vec<String>> for FilterKey {
    fn from(keys: Vec<String>) -> Self {
        FilterKey::Many(keys)
    }
}

impl From<Vec<&str>> for FilterKey {
    fn from(keys: Vec<&str>) -> Self {
        FilterKey::Many(keys.into_iter().map(String::from).collect())
    }
}

/// Metadata filter criterion used by search and filter calls.
///
/// `value` is always serialized; a missing value goes over the wire as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(default)]
    pub on: FilterTarget,
    pub key: FilterKey,
    #[serde(default = "empty_filter_value")]
    pub value: serde_json::Value,
    #[serde(default)]
    pub lookup: LookupOperator,
}

fn empty_filter_value() -> serde_json::Value {
    serde_json::Value::String(String::new())
}

impl QueryFilter {
    /// Filter on documents by `key` with an empty value and exact lookup.
    pub fn new(key: impl Into<FilterKey>) -> Self {
        Self {
            on: FilterTarget::Document,
            key: key.into(),
            value: empty_filter_value(),
            lookup: LookupOperator::KeyLookup,
        }
    }

    pub fn on(mut self, target: FilterTarget) -> Self {
        self.on = target;
        self
    }

    /// Set the value; `None` resets it to the empty string.
    pub fn value(mut self, value: Option<serde_json::Value>) -> Self {
        self.value = match value {
            Some(serde_json::Value::Null) | None => empty_filter_value(),
            Some(v) => v,
        };
        self
    }

    pub fn lookup(mut self, lookup: LookupOperator) -> Self {
        self.lookup = lookup;
        self
    }
}

/// Result of `POST /v1/filter/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterResults {
    Documents(Vec<DocumentOut>),
    Collections(Vec<CollectionOut>),
}

impl FilterResults {
    pub fn len(&self) -> usize {
        match self {
            FilterResults::Documents(d) => d.len(),
            FilterResults::Collections(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /v1/search/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub collection_name: String,
    pub top_k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_filter: Option<QueryFilter>,
}

impl SearchRequest {
    /// Search every collection for `query`, returning the default top-k.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            collection_name: ALL_COLLECTIONS.to_string(),
            top_k: DEFAULT_TOP_K,
            query_filter: None,
        }
    }

    pub fn collection(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.query_filter = Some(filter);
        self
    }
}

/// Image search input. The image comes from a local file or inline base64.
#[derive(Debug, Clone)]
pub struct SearchImage {
    pub img_path: Option<PathBuf>,
    pub img_base64: Option<String>,
    pub collection_name: String,
    pub top_k: u32,
    pub query_filter: Option<QueryFilter>,
}

impl Default for SearchImage {
    fn default() -> Self {
        Self {
            img_path: None,
            img_base64: None,
            collection_name: ALL_COLLECTIONS.to_string(),
            top_k: DEFAULT_TOP_K,
            query_filter: None,
        }
    }
}

impl SearchImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            img_path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn from_base64(content: impl Into<String>) -> Self {
        Self {
            img_base64: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn collection(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.query_filter = Some(filter);
        self
    }
}

/// Body of `POST /v1/search-image/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchImageRequest {
    pub img_base64: String,
    pub collection_name: String,
    pub top_k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_filter: Option<QueryFilter>,
}

/// A ranked page returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOutQuery {
    pub collection_name: String,
    pub collection_id: i64,
    #[serde(default)]
    pub collection_metadata: Option<Metadata>,
    pub document_name: String,
    pub document_id: i64,
    #[serde(default)]
    pub document_metadata: Option<Metadata>,
    pub page_number: u32,
    pub raw_score: f64,
    pub normalized_score: f64,
    pub img_base64: String,
}

/// Response of a text search. Results are in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOut {
    pub query: String,
    pub results: Vec<PageOutQuery>,
}

/// Response of an image search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchImageOut {
    pub results: Vec<PageOutQuery>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Embeddings
// ─────────────────────────────────────────────────────────────────────────────

/// Embedding task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingTask {
    #[default]
    Query,
    Image,
}

impl FromStr for EmbeddingTask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("query") {
            Ok(EmbeddingTask::Query)
        } else if s.eq_ignore_ascii_case("image") {
            Ok(EmbeddingTask::Image)
        } else {
            Err(Error::InvalidTask(s.to_string()))
        }
    }
}

impl fmt::Display for EmbeddingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingTask::Query => f.write_str("query"),
            EmbeddingTask::Image => f.write_str("image"),
        }
    }
}

/// Anything that names an embedding task: the enum itself or a string
/// synonym, validated once at the call boundary.
pub trait IntoEmbeddingTask {
    fn into_task(self) -> Result<EmbeddingTask>;
}

impl IntoEmbeddingTask for EmbeddingTask {
    fn into_task(self) -> Result<EmbeddingTask> {
        Ok(self)
    }
}

impl IntoEmbeddingTask for &str {
    fn into_task(self) -> Result<EmbeddingTask> {
        self.parse()
    }
}

impl IntoEmbeddingTask for String {
    fn into_task(self) -> Result<EmbeddingTask> {
        self.parse()
    }
}

impl IntoEmbeddingTask for &String {
    fn into_task(self) -> Result<EmbeddingTask> {
        self.parse()
    }
}

/// Embedding input, always a sequence on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingInput(pub Vec<String>);

impl From<&str> for EmbeddingInput {
    fn from(item: &str) -> Self {
        EmbeddingInput(vec![item.to_string()])
    }
}

impl From<String> for EmbeddingInput {
    fn from(item: String) -> Self {
        EmbeddingInput(vec![item])
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(items: Vec<String>) -> Self {
        EmbeddingInput(items)
    }
}

impl From<Vec<&str>> for EmbeddingInput {
    fn from(items: Vec<&str>) -> Self {
        EmbeddingInput(items.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for EmbeddingInput {
    fn from(items: &[&str]) -> Self {
        EmbeddingInput(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Body of `POST /v1/embeddings/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub input_data: Vec<String>,
    pub task: EmbeddingTask,
}

/// One embedding per input item (multi-vector: one row per token/patch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsData {
    #[serde(rename = "_object", default)]
    pub object: String,
    pub embedding: Vec<Vec<f32>>,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Response of `POST /v1/embeddings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsOut {
    #[serde(rename = "_object", default)]
    pub object: String,
    pub data: Vec<EmbeddingsData>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub usage: EmbeddingsUsage,
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks and helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /v1/webhook/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub url: String,
}

/// Webhook registration. The caller must keep `webhook_secret` to validate
/// incoming deliveries later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookOut {
    pub app_id: String,
    pub endpoint_id: String,
    pub webhook_secret: String,
}

/// One page image produced by the file conversion helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOut {
    pub img_base64: String,
    pub page_number: u32,
}
