//! Documents API.

use tracing::debug;

use crate::client::{ColivaraClient, path_segment};
use crate::encode::{encode_file, resolve_document_content};
use crate::error::Result;
use crate::types::{
    DocumentOut, DocumentQuery, PatchDocument, PatchDocumentRequest, UpsertDocument,
    UpsertDocumentRequest, UpsertOutcome,
};

#[derive(serde::Serialize)]
struct CollectionQuery<'a> {
    collection_name: &'a str,
}

impl UpsertDocument {
    /// Resolve the content source and build the wire request.
    ///
    /// Local files are read here; a document without any source fails with
    /// [`crate::Error::MissingDocumentSource`].
    pub async fn into_request(self) -> Result<UpsertDocumentRequest> {
        let content = resolve_document_content(
            self.url.as_deref(),
            self.base64.as_deref(),
            self.document_path.as_deref(),
        )
        .await?;

        Ok(UpsertDocumentRequest {
            name: self.name,
            metadata: self.metadata,
            collection_name: self.collection_name,
            url: content.url,
            base64: content.base64,
            wait: self.wait,
            use_proxy: self.use_proxy,
        })
    }
}

impl PatchDocument {
    /// Build the wire request, encoding `document_path` if set.
    pub async fn into_request(self) -> Result<PatchDocumentRequest> {
        let base64 = match self.document_path.as_deref() {
            Some(path) => Some(encode_file(path).await?),
            None => self.base64,
        };

        Ok(PatchDocumentRequest {
            collection_name: self.collection_name,
            name: self.name,
            metadata: self.metadata,
            url: self.url,
            base64,
            use_proxy: self.use_proxy,
        })
    }
}

/// Documents API client.
pub struct DocumentsApi {
    client: ColivaraClient,
}

impl DocumentsApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Insert or replace a document, keyed by name within its collection.
    ///
    /// Content is validated and encoded before anything is sent.
    pub async fn upsert(&self, document: UpsertDocument) -> Result<UpsertOutcome> {
        let request = document.into_request().await?;
        debug!(
            name = %request.name,
            collection = %request.collection_name,
            wait = request.wait,
            "upserting document"
        );
        self.client.post("documents/upsert-document/", &request).await
    }

    /// Get a document by name.
    pub async fn get(&self, name: &str, query: DocumentQuery) -> Result<DocumentOut> {
        self.client
            .get_with_query(&format!("documents/{}/", path_segment(name)?), &query)
            .await
    }

    /// List the documents of a collection.
    pub async fn list(&self, query: DocumentQuery) -> Result<Vec<DocumentOut>> {
        self.client.get_with_query("documents/", &query).await
    }

    /// Partially update a document.
    pub async fn update(&self, name: &str, patch: PatchDocument) -> Result<DocumentOut> {
        let request = patch.into_request().await?;
        self.client
            .patch(&format!("documents/{}/", path_segment(name)?), &request)
            .await
    }

    /// Delete a document from a collection.
    pub async fn delete(&self, name: &str, collection_name: &str) -> Result<()> {
        self.client
            .delete_with_query(
                &format!("documents/delete-document/{}/", path_segment(name)?),
                &CollectionQuery { collection_name },
            )
            .await
    }
}
