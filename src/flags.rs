//! Feature flag lookup
//!
//! Fetches the caller's `authkitWhitelist` flag from
//! `GET {base_url}/v1/users/flags`. The lookup is best-effort: callers go
//! through [`lookup_whitelist`], which never fails.

use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::endpoint_url;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Path of the user flags endpoint
pub const FLAGS_PATH: &str = "/v1/users/flags";

/// Name of the whitelist flag in the flags response
pub const WHITELIST_FIELD: &str = "authkitWhitelist";

/// Source of the caller's whitelist flag
#[async_trait]
pub trait FlagSource: Send + Sync {
    /// Fetch the flag, failing on any transport, status or shape problem
    async fn whitelist_flag(&self) -> Result<bool>;
}

/// Flag source backed by the flags endpoint
#[derive(Debug, Clone)]
pub struct HttpFlagSource {
    client: HttpClient,
    url: String,
    headers: StringMap,
}

impl HttpFlagSource {
    /// Create a flag source for the given service base URL
    pub fn new(client: HttpClient, base_url: &str, headers: StringMap) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint_url(base_url, FLAGS_PATH)?,
            headers,
        })
    }
}

#[async_trait]
impl FlagSource for HttpFlagSource {
    async fn whitelist_flag(&self) -> Result<bool> {
        let body: JsonValue = self
            .client
            .get_json_with_config(&self.url, RequestConfig::new().headers(&self.headers))
            .await?;
        extract_whitelist(&body)
    }
}

/// Read the whitelist flag out of a flags response body
pub fn extract_whitelist(body: &JsonValue) -> Result<bool> {
    match body.get(WHITELIST_FIELD) {
        Some(JsonValue::Bool(flag)) => Ok(*flag),
        Some(other) => Err(Error::decode(format!(
            "{WHITELIST_FIELD} is not a boolean: {other}"
        ))),
        None => Err(Error::decode(format!("{WHITELIST_FIELD} missing from flags"))),
    }
}

/// Look up the whitelist flag, degrading to `false` on any failure
pub async fn lookup_whitelist(source: &dyn FlagSource) -> bool {
    match source.whitelist_flag().await {
        Ok(flag) => {
            debug!(whitelist = flag, "Fetched whitelist flag");
            flag
        }
        Err(e) => {
            warn!(error = %e, "Flag lookup failed, defaulting whitelist to false");
            false
        }
    }
}
