//! Main client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::api::{
    CollectionsApi, DocumentsApi, EmbeddingsApi, FilterApi, HealthApi, HelpersApi, SearchApi,
    WebhooksApi,
};
use crate::defaults::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::error::{Error, ErrorResponse, Result};
use crate::webhook::{SvixVerifier, WebhookVerifier};

/// Default timeout for requests. Synchronous uploads (`wait = true`) can
/// take a while on large documents.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// ColiVara API client.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use colivara_client::ColivaraClient;
///
/// # async fn example() -> colivara_client::Result<()> {
/// let client = ColivaraClient::builder()
///     .api_key("secret")
///     .build()?;
///
/// let collections = client.collections().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ColivaraClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) verifier: Arc<dyn WebhookVerifier>,
}

impl fmt::Debug for ColivaraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColivaraClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ColivaraClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from `COLIVARA_API_KEY` and optional `COLIVARA_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env().build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub(crate) fn verifier(&self) -> &dyn WebhookVerifier {
        self.inner.verifier.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the collections API.
    pub fn collections(&self) -> CollectionsApi {
        CollectionsApi::new(self.clone())
    }

    /// Access the documents API.
    pub fn documents(&self) -> DocumentsApi {
        DocumentsApi::new(self.clone())
    }

    /// Access the search API.
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access the embeddings API.
    pub fn embeddings(&self) -> EmbeddingsApi {
        EmbeddingsApi::new(self.clone())
    }

    /// Access the metadata filter API.
    pub fn filter(&self) -> FilterApi {
        FilterApi::new(self.clone())
    }

    /// Access the webhooks API.
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    /// Access the file helper API.
    pub fn helpers(&self) -> HelpersApi {
        HelpersApi::new(self.clone())
    }

    /// Access the health API.
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    ///
    /// `path` is joined as-is; user-supplied names must go through
    /// [`path_segment`] first.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("v1/{}", path))
            .map_err(Error::from)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "colivara request");
        Ok(self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout))
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path)?.send().await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request with query parameters.
    pub(crate) async fn post_with_query<T, B, Q>(&self, path: &str, body: &B, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
        Q: serde::Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST, path)?
            .query(query)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a multipart POST request.
    pub(crate) async fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, path)?
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(Method::PATCH, path)?.json(body).send().await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        self.expect_success(response).await
    }

    /// Make a DELETE request with query parameters.
    pub(crate) async fn delete_with_query<Q>(&self, path: &str, query: &Q) -> Result<()>
    where
        Q: serde::Serialize + ?Sized,
    {
        let response = self
            .request(Method::DELETE, path)?
            .query(query)
            .send()
            .await?;
        self.expect_success(response).await
    }

    async fn expect_success(&self, response: Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    ///
    /// The server's `detail` field becomes the message; bodies without one
    /// fall back to the status reason.
    async fn extract_error(&self, response: Response) -> Error {
        let status = response.status();
        let fallback = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        let message = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
                .map(|err| err.message())
                .unwrap_or(fallback),
            Err(_) => fallback,
        };

        debug!(status = status.as_u16(), %message, "colivara request failed");
        Error::Api {
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Builder for creating a [`ColivaraClient`].
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    verifier: Option<Arc<dyn WebhookVerifier>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            verifier: None,
        }
    }

    /// Create a builder seeded from `COLIVARA_API_KEY` and `COLIVARA_BASE_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            builder.api_key = Some(key);
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.is_empty()
        {
            builder.base_url = Some(url);
        }
        builder
    }

    /// Set the API key sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL. Defaults to the production host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Replace the webhook signature verifier.
    pub fn webhook_verifier(mut self, verifier: impl WebhookVerifier + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ColivaraClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("api_key is required".to_string()))?;

        // Parse and normalize base URL
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| Error::Config("Invalid API key".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("colivara-rs/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(ColivaraClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                verifier: self.verifier.unwrap_or_else(|| Arc::new(SvixVerifier)),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encode a collection or document name as a single path segment.
///
/// `/`, `?`, `#` and the like are escaped so the name cannot leave its
/// segment. Empty names and dot segments cannot be addressed at all.
pub(crate) fn path_segment(name: &str) -> Result<String> {
    if matches!(name, "" | "." | "..") {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(urlencoding::encode(name).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ClientBuilder::new().api_key("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_defaults_to_production_host() {
        let client = ClientBuilder::new().api_key("k").build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.colivara.com/");
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .api_key("k")
            .base_url("http://localhost:8001")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8001/");
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = ClientBuilder::new()
            .api_key("k")
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .api_key("k")
            .base_url("http://localhost:8001")
            .build()
            .unwrap();

        let url = client.url("collections/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/v1/collections/");

        let url = client.url("/search/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/v1/search/");
    }

    #[test]
    fn test_url_building_with_path_prefix() {
        let client = ClientBuilder::new()
            .api_key("k")
            .base_url("http://localhost:8001/proxy")
            .build()
            .unwrap();

        let url = client.url("health/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/proxy/v1/health/");
    }

    #[test]
    fn test_path_segment_escapes_reserved_characters() {
        assert_eq!(path_segment("research").unwrap(), "research");
        assert_eq!(path_segment("report #2").unwrap(), "report%20%232");
        assert_eq!(path_segment("a?b=c").unwrap(), "a%3Fb%3Dc");
        assert_eq!(path_segment("../x").unwrap(), "..%2Fx");
        assert_eq!(path_segment("paper.v2.pdf").unwrap(), "paper.v2.pdf");
    }

    #[test]
    fn test_path_segment_rejects_dot_segments() {
        for name in ["", ".", ".."] {
            assert!(matches!(path_segment(name), Err(Error::InvalidName(_))));
        }
    }

    #[test]
    fn test_escaped_segment_stays_under_resource() {
        let client = ClientBuilder::new()
            .api_key("k")
            .base_url("http://localhost:8001")
            .build()
            .unwrap();

        let name = path_segment("../documents/delete-document/x").unwrap();
        let url = client.url(&format!("collections/{name}/")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8001/v1/collections/..%2Fdocuments%2Fdelete-document%2Fx/"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let builder = ClientBuilder::new().api_key("super-secret");
        assert!(!format!("{builder:?}").contains("super-secret"));
    }
}
