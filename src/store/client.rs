//! Data-store REST client.

use http::{HeaderValue, Method, header};
use serde_json::Value;

use crate::config::{DataStoreConfig, EnvSource, Provider};
use crate::error::{ServiceError, ServiceResult};
use crate::transport::{HttpRequest, QueryParams, Transport, endpoint, exchange};

/// `Prefer` header, sent on inserts so the store echoes the created rows.
const PREFER: header::HeaderName = header::HeaderName::from_static("prefer");
const API_KEY: header::HeaderName = header::HeaderName::from_static("apikey");

/// Options for a single table request.
///
/// Filters use the store's own syntax (`available=eq.true`) and are passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// HTTP method
    pub method: Method,
    /// Query parameters, in order
    pub query: QueryParams,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query: QueryParams::new(),
            body: None,
        }
    }
}

/// Client for the REST table store.
#[derive(Debug)]
pub struct DataStoreClient<T> {
    transport: T,
    config: DataStoreConfig,
}

impl<T> DataStoreClient<T> {
    /// Creates a client from an already-resolved config.
    #[must_use]
    pub const fn new(transport: T, config: DataStoreConfig) -> Self {
        Self { transport, config }
    }

    /// Resolves [`DataStoreConfig`] from `env` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when a setting is missing or
    /// the project URL is invalid.
    pub fn from_env<E: EnvSource + ?Sized>(transport: T, env: &E) -> ServiceResult<Self> {
        Ok(Self::new(transport, DataStoreConfig::resolve(env)?))
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &DataStoreConfig {
        &self.config
    }

    /// Builds the request for `table`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for an empty table name and
    /// [`ServiceError::Configuration`] if the key is not header-safe.
    pub fn request(&self, table: &str, options: &QueryOptions) -> ServiceResult<HttpRequest> {
        if table.trim().is_empty() {
            return Err(ServiceError::validation("table", "Table name is required"));
        }

        let url = endpoint(self.config.project_url(), &["rest", "v1", table]);
        let mut request = HttpRequest::new(options.method.clone(), url)
            .with_query(&options.query)
            .with_header(API_KEY, self.config.api_key_header()?)
            .with_header(header::AUTHORIZATION, self.config.authorization()?)
            .with_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );

        if options.method == Method::POST {
            request = request.with_header(PREFER, HeaderValue::from_static("return=representation"));
        }
        if let Some(body) = &options.body {
            request = request.with_body(body.to_string().into_bytes());
        }
        Ok(request)
    }
}

impl<T: Transport> DataStoreClient<T> {
    /// Performs one request against `table`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn query(&self, table: &str, options: &QueryOptions) -> ServiceResult<Value> {
        let request = self.request(table, options)?;
        exchange(&self.transport, Provider::Supabase, request).await
    }

    /// Reads rows from `table`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn select(&self, table: &str, query: &QueryParams) -> ServiceResult<Value> {
        let options = QueryOptions {
            query: query.clone(),
            ..QueryOptions::default()
        };
        self.query(table, &options).await
    }

    /// Inserts `row` into `table` and returns the stored representation.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn insert(&self, table: &str, row: &Value) -> ServiceResult<Value> {
        let options = QueryOptions {
            method: Method::POST,
            query: QueryParams::new(),
            body: Some(row.clone()),
        };
        self.query(table, &options).await
    }
}
