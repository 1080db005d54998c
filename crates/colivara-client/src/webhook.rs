//! Webhook signature verification.
//!
//! Deliveries are signed with Svix. [`SvixVerifier`] hands the secret,
//! payload and headers to the `svix` crate; verification sits behind
//! [`WebhookVerifier`] so callers can plug in another implementation.

use std::collections::HashMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use svix::webhooks::Webhook;
use thiserror::Error;
use tracing::debug;

/// Why a delivery failed verification.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("verification failed: {0}")]
    Verification(String),
}

/// Verifies that a webhook delivery was signed with `secret`.
pub trait WebhookVerifier: Send + Sync {
    fn verify(
        &self,
        secret: &str,
        payload: &str,
        headers: &HashMap<String, String>,
    ) -> Result<(), WebhookError>;
}

/// Verifier backed by the `svix` webhook library.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvixVerifier;

impl WebhookVerifier for SvixVerifier {
    fn verify(
        &self,
        secret: &str,
        payload: &str,
        headers: &HashMap<String, String>,
    ) -> Result<(), WebhookError> {
        let webhook =
            Webhook::new(secret).map_err(|e| WebhookError::InvalidSecret(e.to_string()))?;
        webhook
            .verify(payload.as_bytes(), &header_map(headers)?)
            .map_err(|e| WebhookError::Verification(e.to_string()))
    }
}

/// Validate a webhook delivery. Any failure yields `false`.
pub fn validate_webhook(
    verifier: &dyn WebhookVerifier,
    secret: &str,
    payload: &str,
    headers: &HashMap<String, String>,
) -> bool {
    match verifier.verify(secret, payload, headers) {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "webhook verification failed");
            false
        }
    }
}

/// Header names are case-insensitive; `HeaderName` lowercases them.
fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, WebhookError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| WebhookError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| WebhookError::InvalidHeader(name.to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}
