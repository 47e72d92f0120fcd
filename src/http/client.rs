//! HTTP client for the AuthKit endpoints
//!
//! A thin wrapper around `reqwest` that handles:
//! - Default and per-request headers
//! - JSON request and response bodies
//! - Error classification (timeout, transport, upstream status)
//!
//! Each call issues exactly one request. Retries belong to the
//! pagination layer.

use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("authkit-link/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add every header from a map, replacing existing keys
    #[must_use]
    pub fn headers(mut self, headers: &StringMap) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Single-shot HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request with config and parse the JSON response
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// Make a POST request with config and parse the JSON response
    pub async fn post_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::POST, url, config).await
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let bytes = response.bytes().await.map_err(Error::Http)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
    }

    /// Make a generic request.
    ///
    /// Any non-2xx status is returned as [`Error::HttpStatus`] carrying the
    /// response body text.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Request-specific headers win over defaults
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        req = req.timeout(timeout);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Request failed: {} {}", method, url);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
