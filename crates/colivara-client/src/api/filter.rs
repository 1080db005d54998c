//! Metadata filter API.

use crate::client::ColivaraClient;
use crate::error::Result;
use crate::types::{Expand, FilterResults, QueryFilter};

/// Query parameters for the filter endpoint.
#[derive(Debug, Default, serde::Serialize)]
pub struct FilterQuery {
    /// Page expansion for document results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Expand>,
}

/// Filter API client.
pub struct FilterApi {
    client: ColivaraClient,
}

impl FilterApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Find documents or collections whose metadata matches `filter`.
    pub async fn query(&self, filter: QueryFilter, expand: Option<Expand>) -> Result<FilterResults> {
        self.client
            .post_with_query("filter/", &filter, &FilterQuery { expand })
            .await
    }
}
