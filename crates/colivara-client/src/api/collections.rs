//! Collections API.

use crate::client::{ColivaraClient, path_segment};
use crate::error::Result;
use crate::types::{CollectionOut, CreateCollectionRequest, Metadata, PatchCollectionRequest};

/// Collections API client.
pub struct CollectionsApi {
    client: ColivaraClient,
}

impl CollectionsApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Create a collection. Missing metadata is sent as `{}`.
    pub async fn create(
        &self,
        name: impl Into<String>,
        metadata: Option<Metadata>,
    ) -> Result<CollectionOut> {
        let request = CreateCollectionRequest::new(name).metadata(metadata.unwrap_or_default());
        self.create_with(request).await
    }

    /// Create a collection from a prepared request.
    pub async fn create_with(&self, request: CreateCollectionRequest) -> Result<CollectionOut> {
        self.client.post("collections/", &request).await
    }

    /// Get a collection by name.
    pub async fn get(&self, name: &str) -> Result<CollectionOut> {
        self.client
            .get(&format!("collections/{}/", path_segment(name)?))
            .await
    }

    /// List all collections, in server order.
    pub async fn list(&self) -> Result<Vec<CollectionOut>> {
        self.client.get("collections/").await
    }

    /// Partially update a collection.
    pub async fn update(
        &self,
        name: &str,
        request: PatchCollectionRequest,
    ) -> Result<CollectionOut> {
        self.client
            .patch(&format!("collections/{}/", path_segment(name)?), &request)
            .await
    }

    /// Delete a collection and its documents.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete(&format!("collections/{}/", path_segment(name)?))
            .await
    }
}
