//! Health API.

use crate::client::ColivaraClient;
use crate::error::Result;

/// Health API client.
pub struct HealthApi {
    client: ColivaraClient,
}

impl HealthApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Check service health, returning the body the service reports.
    pub async fn check(&self) -> Result<serde_json::Value> {
        self.client.get("health/").await
    }

    /// Simple connectivity check - returns true if the service is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.check().await.is_ok()
    }
}
