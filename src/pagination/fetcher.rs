//! Page fetching
//!
//! The [`PageFetcher`] trait is the capability the orchestrator drives.
//! [`HttpPageFetcher`] is the production implementation against the
//! AuthKit collection endpoint.

use super::types::PageResult;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Path of the connector collection endpoint
pub const AUTHKIT_PATH: &str = "/v1/authkit";

/// Fetches one page of the connector collection
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `page` (1-based) with `limit` rows per page. Must not retry.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageResult>;
}

/// Check page fetch arguments before any request goes out
pub fn validate_page_args(page: u32, limit: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::invalid_value("page", "must be at least 1"));
    }
    if limit == 0 {
        return Err(Error::invalid_value("limit", "must be greater than 0"));
    }
    Ok(())
}

/// Join a base URL and an absolute endpoint path
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<String> {
    Url::parse(base_url)?;
    Ok(format!("{}{}", base_url.trim_end_matches('/'), path))
}

/// Page fetcher backed by `POST {base_url}/v1/authkit?limit=&page=`
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
    url: String,
    headers: StringMap,
    payload: Option<JsonValue>,
}

impl HttpPageFetcher {
    /// Create a fetcher for the given service base URL
    pub fn new(
        client: HttpClient,
        base_url: &str,
        headers: StringMap,
        payload: Option<JsonValue>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint_url(base_url, AUTHKIT_PATH)?,
            headers,
            payload,
        })
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageResult> {
        validate_page_args(page, limit)?;

        let body = self.payload.clone().unwrap_or_else(|| json!({}));
        let config = RequestConfig::new()
            .query("limit", limit.to_string())
            .query("page", page.to_string())
            .headers(&self.headers)
            .json(body);

        let result: PageResult = self.client.post_json_with_config(&self.url, config).await?;
        debug!(
            page,
            pages = result.pages,
            rows = result.rows.len(),
            "Fetched connector page"
        );
        Ok(result)
    }
}
