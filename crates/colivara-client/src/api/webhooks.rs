//! Webhooks API.

use std::collections::HashMap;

use crate::client::ColivaraClient;
use crate::error::Result;
use crate::types::{WebhookOut, WebhookRequest};
use crate::webhook::validate_webhook;

/// Webhooks API client.
pub struct WebhooksApi {
    client: ColivaraClient,
}

impl WebhooksApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Register a webhook endpoint.
    ///
    /// The returned `webhook_secret` is needed later by [`Self::validate`];
    /// store it, the client does not.
    pub async fn add(&self, url: impl Into<String>) -> Result<WebhookOut> {
        let request = WebhookRequest { url: url.into() };
        self.client.post("webhook/", &request).await
    }

    /// Check that a delivery was signed with `secret`.
    ///
    /// Never fails: malformed headers, a bad secret or a verifier error all
    /// yield `false`.
    pub fn validate(
        &self,
        secret: &str,
        payload: &str,
        headers: &HashMap<String, String>,
    ) -> bool {
        validate_webhook(self.client.verifier(), secret, payload, headers)
    }
}
