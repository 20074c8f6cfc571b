//! MOEX ISS REST API client implementation.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, Span, debug, error};

use crate::auth::{
    ChunkedTokenStore, DEFAULT_CHUNK_SIZE, DEFAULT_SERVICE, DEFAULT_USERNAME, SecretStore,
};
use crate::error::MoexError;
use crate::rest::endpoints::MOEX_BASE_URL;
use crate::types::IssResponse;

/// The MOEX ALGOPACK REST API client.
///
/// Every accessor comes in two forms:
/// - `try_get_*` returns `Result<Option<IssResponse>>`, so callers can tell
///   "no data" (`Ok(None)`) apart from a failed request (`Err`).
/// - `get_*` logs any failure and returns `None` in its place.
///
/// # Example
///
/// ```rust,no_run
/// use moex_api_client::MoexClient;
/// use moex_api_client::types::Market;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MoexClient::builder().token("<token>").build();
///
///     if let Some(ticker) = client.try_get_ticker(Market::Shares, "SBER").await? {
///         let marketdata = ticker.dataset("marketdata").unwrap();
///         println!("Last: {:?}", marketdata.value(0, "LAST"));
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct MoexClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    has_token: bool,
    span: Span,
    max_pages: Option<usize>,
}

impl MoexClient {
    /// Create a new client with default settings.
    ///
    /// The token is loaded from the default secret store, if one is configured.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> MoexClientBuilder {
        MoexClientBuilder::new()
    }

    /// Whether requests carry an `Authorization` header.
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    /// Page cap applied to paginated accessors, if any.
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// Make a GET request with query parameters and decode the ISS envelope.
    pub(crate) async fn get_json<Q>(&self, endpoint: &str, params: &Q) -> Result<IssResponse, MoexError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| MoexError::InvalidResponse(e.to_string()))?;
        let url = if query_string.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query_string)
        };

        async {
            let response = self.http_client.get(&url).send().await?;
            Self::check_result(response).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// Check the status of a response and decode its body.
    async fn check_result(response: reqwest::Response) -> Result<IssResponse, MoexError> {
        let status = response.status();
        let url = response.url();
        let path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), %path, %body, "Request failed");
            return Err(MoexError::Status {
                status: status.as_u16(),
                path,
                body,
            });
        }

        debug!(%path, "Request");
        debug!(%body, "Response");
        Ok(serde_json::from_str(&body)?)
    }

    /// Turn a failure into a logged `None`.
    pub(crate) fn report<T>(&self, operation: &str, result: Result<Option<T>, MoexError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                let _entered = self.span.enter();
                error!(operation, "{e}");
                None
            }
        }
    }

    /// Called with the number of pages already merged, before merging another.
    pub(crate) fn check_page_limit(&self, pages: usize) -> Result<(), MoexError> {
        match self.max_pages {
            Some(max) if pages >= max => Err(MoexError::PageLimitExceeded(max)),
            _ => Ok(()),
        }
    }
}

impl Default for MoexClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoexClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.has_token)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// Builder for [`MoexClient`].
pub struct MoexClientBuilder {
    base_url: String,
    token: Option<SecretString>,
    secret_store: Option<Arc<dyn SecretStore>>,
    service: String,
    username: String,
    chunk_size: usize,
    user_agent: Option<String>,
    span: Option<Span>,
    max_pages: Option<usize>,
}

impl MoexClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: MOEX_BASE_URL.to_string(),
            token: None,
            secret_store: default_secret_store(),
            service: DEFAULT_SERVICE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: None,
            span: None,
            max_pages: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer token. It is also written to the secret store, if any.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the store the token is loaded from and saved to.
    pub fn secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secret_store = Some(store);
        self
    }

    /// Do not read or write any secret store.
    pub fn without_secret_store(mut self) -> Self {
        self.secret_store = None;
        self
    }

    /// Set the service and username the token parts are stored under.
    pub fn keyring_entry(mut self, service: impl Into<String>, username: impl Into<String>) -> Self {
        self.service = service.into();
        self.username = username.into();
        self
    }

    /// Set the maximum length of one stored token part.
    pub fn token_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the span all client events are recorded in.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Fail paginated accessors that return more than this many non-empty pages.
    ///
    /// Pagination is unbounded by default.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Build the client.
    pub fn build(self) -> MoexClient {
        let span = self
            .span
            .unwrap_or_else(|| tracing::info_span!("moex", base_url = %self.base_url));

        let token = {
            let _entered = span.enter();
            let store = self.secret_store.map(ChunkedTokenStore::new);
            match (self.token, store) {
                (Some(token), Some(store)) => {
                    store.save(&self.service, &self.username, &token, self.chunk_size);
                    Some(token)
                }
                (Some(token), None) => Some(token),
                (None, Some(store)) => store.load(&self.service, &self.username),
                (None, None) => None,
            }
        };

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("moex-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("moex-api-client"));
        headers.insert(USER_AGENT, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut has_token = false;
        if let Some(token) = &token {
            match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                    has_token = true;
                }
                Err(_) => {
                    let _entered = span.enter();
                    error!("Token contains characters not allowed in a header");
                }
            }
        }

        // Build the HTTP client with middleware.
        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        MoexClient {
            http_client: client,
            base_url: self.base_url,
            has_token,
            span,
            max_pages: self.max_pages,
        }
    }
}

impl Default for MoexClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "keyring")]
fn default_secret_store() -> Option<Arc<dyn SecretStore>> {
    Some(Arc::new(crate::auth::KeyringStore::new()))
}

#[cfg(not(feature = "keyring"))]
fn default_secret_store() -> Option<Arc<dyn SecretStore>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;

    #[test]
    fn test_token_is_saved_to_store() {
        let store = Arc::new(MemoryStore::new());
        let token = "t".repeat(1200);
        let client = MoexClient::builder()
            .secret_store(store.clone())
            .token(token.clone())
            .build();
        assert!(client.has_token());
        assert_eq!(store.len(), 3);

        let reloaded = MoexClient::builder().secret_store(store).build();
        assert!(reloaded.has_token());
    }

    #[test]
    fn test_missing_token_builds_unauthenticated_client() {
        let client = MoexClient::builder()
            .secret_store(Arc::new(MemoryStore::new()))
            .build();
        assert!(!client.has_token());
    }

    #[test]
    fn test_custom_keyring_entry() {
        let store = Arc::new(MemoryStore::new());
        MoexClient::builder()
            .secret_store(store.clone())
            .keyring_entry("svc", "user")
            .token_chunk_size(4)
            .token("abcdefgh")
            .build();
        assert_eq!(store.get("svc", "user0").unwrap().as_deref(), Some("abcd"));
        assert_eq!(store.get("svc", "user1").unwrap().as_deref(), Some("efgh"));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = MoexClient::builder()
            .without_secret_store()
            .token("super_secret")
            .max_pages(10)
            .build();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("has_token: true"));
        assert_eq!(client.max_pages(), Some(10));
    }

    #[test]
    fn test_page_limit() {
        let client = MoexClient::builder()
            .without_secret_store()
            .max_pages(2)
            .build();
        assert!(client.check_page_limit(1).is_ok());
        assert!(matches!(
            client.check_page_limit(2),
            Err(MoexError::PageLimitExceeded(2))
        ));
    }
}
