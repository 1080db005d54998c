//! Embeddings API.

use crate::client::ColivaraClient;
use crate::encode::resolve_embedding_image_inputs;
use crate::error::Result;
use crate::types::{
    EmbeddingInput, EmbeddingTask, EmbeddingsOut, EmbeddingsRequest, IntoEmbeddingTask,
};

/// Embeddings API client.
pub struct EmbeddingsApi {
    client: ColivaraClient,
}

impl EmbeddingsApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Build the wire request for an embeddings call.
    ///
    /// The task is validated first. For [`EmbeddingTask::Image`] each input
    /// naming a local file is replaced by the file's base64 content.
    pub async fn build_request(
        input: impl Into<EmbeddingInput>,
        task: impl IntoEmbeddingTask,
    ) -> Result<EmbeddingsRequest> {
        let task = task.into_task()?;
        let EmbeddingInput(items) = input.into();

        let input_data = match task {
            EmbeddingTask::Image => resolve_embedding_image_inputs(&items).await,
            EmbeddingTask::Query => items,
        };

        Ok(EmbeddingsRequest { input_data, task })
    }

    /// Generate embeddings for queries or images.
    pub async fn create(
        &self,
        input: impl Into<EmbeddingInput>,
        task: impl IntoEmbeddingTask,
    ) -> Result<EmbeddingsOut> {
        let request = Self::build_request(input, task).await?;
        self.client.post("embeddings/", &request).await
    }

    /// Generate query embeddings.
    pub async fn query(&self, input: impl Into<EmbeddingInput>) -> Result<EmbeddingsOut> {
        self.create(input, EmbeddingTask::default()).await
    }
}
