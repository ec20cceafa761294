//! Content-delivery API client.

use serde_json::Value;

use crate::config::{ContentConfig, EnvSource, Provider};
use crate::error::{ServiceError, ServiceResult};
use crate::transport::{HttpRequest, QueryParams, Transport, endpoint, exchange};

/// Client for the content-delivery API.
///
/// Every call issues exactly one `GET` and returns the decoded JSON
/// unchanged. Pagination is left to the caller (`skip`/`limit` pass through
/// like any other parameter).
///
/// # Example
///
/// ```no_run
/// use beatstore_clients::config::ProcessEnv;
/// use beatstore_clients::content::ContentClient;
/// use beatstore_clients::transport::{QueryParams, ReqwestTransport};
///
/// # async fn demo() -> beatstore_clients::error::ServiceResult<()> {
/// let client = ContentClient::from_env(ReqwestTransport::new(), &ProcessEnv)?;
/// let beats = client
///     .get_entries(&QueryParams::new().with("content_type", "beat"))
///     .await?;
/// println!("{beats}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ContentClient<T> {
    transport: T,
    config: ContentConfig,
}

impl<T> ContentClient<T> {
    /// Creates a client from an already-resolved config.
    #[must_use]
    pub const fn new(transport: T, config: ContentConfig) -> Self {
        Self { transport, config }
    }

    /// Resolves [`ContentConfig`] from `env` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when a required setting is missing.
    pub fn from_env<E: EnvSource + ?Sized>(transport: T, env: &E) -> ServiceResult<Self> {
        Ok(Self::new(transport, ContentConfig::resolve(env)?))
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn entries_url(&self, id: Option<&str>) -> url::Url {
        let mut segments = vec![
            "spaces",
            self.config.space_id(),
            "environments",
            self.config.environment(),
            "entries",
        ];
        segments.extend(id);
        endpoint(self.config.base_url(), &segments)
    }

    fn authorized(&self, request: HttpRequest) -> ServiceResult<HttpRequest> {
        Ok(request.with_header(http::header::AUTHORIZATION, self.config.authorization()?))
    }

    /// Builds the request for a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for an empty id and
    /// [`ServiceError::Configuration`] if the token is not header-safe.
    pub fn entry_request(&self, id: &str) -> ServiceResult<HttpRequest> {
        if id.trim().is_empty() {
            return Err(ServiceError::validation("id", "Entry id is required"));
        }
        self.authorized(HttpRequest::get(self.entries_url(Some(id))))
    }

    /// Builds the request for one page of entries.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the token is not header-safe.
    pub fn entries_request(&self, query: &QueryParams) -> ServiceResult<HttpRequest> {
        self.authorized(HttpRequest::get(self.entries_url(None)).with_query(query))
    }
}

impl<T: Transport> ContentClient<T> {
    /// Fetches one entry by id.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange; see
    /// [`classify`](crate::transport::classify).
    pub async fn get_entry(&self, id: &str) -> ServiceResult<Value> {
        let request = self.entry_request(id)?;
        exchange(&self.transport, Provider::Contentful, request).await
    }

    /// Fetches one page of entries; `query` is passed through verbatim.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn get_entries(&self, query: &QueryParams) -> ServiceResult<Value> {
        let request = self.entries_request(query)?;
        exchange(&self.transport, Provider::Contentful, request).await
    }
}
