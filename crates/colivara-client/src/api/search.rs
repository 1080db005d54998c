//! Search API.

use crate::client::ColivaraClient;
use crate::encode::encode_file;
use crate::error::{Error, Result};
use crate::types::{QueryOut, SearchImage, SearchImageOut, SearchImageRequest, SearchRequest};

impl SearchImage {
    /// Resolve the image and build the wire request.
    pub async fn into_request(self) -> Result<SearchImageRequest> {
        let img_base64 = match (self.img_path.as_deref(), self.img_base64) {
            (Some(path), _) => encode_file(path).await?,
            (None, Some(content)) => content,
            (None, None) => return Err(Error::MissingImageSource),
        };

        Ok(SearchImageRequest {
            img_base64,
            collection_name: self.collection_name,
            top_k: self.top_k,
            query_filter: self.query_filter,
        })
    }
}

/// Search API client.
pub struct SearchApi {
    client: ColivaraClient,
}

impl SearchApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Search every collection for `query` with default settings.
    pub async fn text(&self, query: impl Into<String>) -> Result<QueryOut> {
        self.query(SearchRequest::new(query)).await
    }

    /// Run a text search. Results come back in server order.
    pub async fn query(&self, request: SearchRequest) -> Result<QueryOut> {
        self.client.post("search/", &request).await
    }

    /// Search with an image instead of text.
    pub async fn image(&self, request: SearchImage) -> Result<SearchImageOut> {
        let request = request.into_request().await?;
        self.client.post("search-image/", &request).await
    }
}
