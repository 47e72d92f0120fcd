//! Event link token aggregation
//!
//! Entry point for the token-issuance flow. Sequences the best-effort
//! whitelist flag lookup and the must-succeed pagination run, then merges
//! both into a [`LinkTokenOutcome`].
//!
//! # Overview
//!
//! - [`aggregate_link_token`] - core sequencing over injected collaborators
//! - [`LinkTokenClient`] - wires the HTTP collaborators from a config
//! - [`create_event_link_token`] - one-shot call with default settings

mod types;

pub use types::LinkTokenOutcome;

use crate::config::LinkTokenConfig;
use crate::error::Result;
use crate::flags::{lookup_whitelist, FlagSource, HttpFlagSource};
use crate::http::HttpClient;
use crate::pagination::{fetch_all_pages, HttpPageFetcher, PageFetcher, PaginationOptions};
use crate::types::{JsonValue, StringMap};
use tracing::{error, info, warn};

/// Look up the flag (when a source is given), fetch every page, merge.
///
/// Flag failures never fail the aggregation. Pagination failures resolve to
/// [`LinkTokenOutcome::UpstreamError`] or [`LinkTokenOutcome::Indeterminate`].
pub async fn aggregate_link_token(
    flags: Option<&dyn FlagSource>,
    fetcher: &dyn PageFetcher,
    options: &PaginationOptions,
) -> LinkTokenOutcome {
    let whitelist = match flags {
        Some(source) => Some(lookup_whitelist(source).await),
        None => None,
    };

    match fetch_all_pages(fetcher, options).await {
        Ok(aggregated) => {
            let aggregated = match whitelist {
                Some(flag) => aggregated.with_whitelist(flag),
                None => aggregated,
            };
            info!(
                rows = aggregated.rows.len(),
                total = aggregated.total,
                whitelist = ?whitelist,
                "Aggregated event link token connectors"
            );
            LinkTokenOutcome::Success(aggregated)
        }
        Err(e) => {
            let outcome = LinkTokenOutcome::from_error(e);
            match &outcome {
                LinkTokenOutcome::UpstreamError { status, .. } => {
                    warn!(status, "Pagination failed, passing upstream error through");
                }
                LinkTokenOutcome::Indeterminate(e) => {
                    error!(error = %e, "Pagination failed without an upstream body");
                }
                LinkTokenOutcome::Success(_) => {}
            }
            outcome
        }
    }
}

/// Link token aggregator over the AuthKit HTTP endpoints
#[derive(Debug, Clone)]
pub struct LinkTokenClient {
    client: HttpClient,
    config: LinkTokenConfig,
}

impl LinkTokenClient {
    /// Create a client, validating the configuration
    pub fn new(config: LinkTokenConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(config.http.to_client_config())?;
        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &LinkTokenConfig {
        &self.config
    }

    /// Build the aggregated connector response for a token-issuance caller
    pub async fn create_event_link_token(
        &self,
        headers: &StringMap,
        base_url: &str,
        payload: Option<JsonValue>,
    ) -> LinkTokenOutcome {
        let fetcher =
            match HttpPageFetcher::new(self.client.clone(), base_url, headers.clone(), payload) {
                Ok(fetcher) => fetcher,
                Err(e) => return LinkTokenOutcome::Indeterminate(e),
            };

        let flags = if self.config.include_flags {
            match HttpFlagSource::new(self.client.clone(), base_url, headers.clone()) {
                Ok(source) => Some(source),
                Err(e) => return LinkTokenOutcome::Indeterminate(e),
            }
        } else {
            None
        };

        aggregate_link_token(
            flags.as_ref().map(|s| s as &dyn FlagSource),
            &fetcher,
            &self.config.pagination,
        )
        .await
    }
}

/// Aggregate with default settings (flag lookup on, 100 per page, 3 in
/// flight, 3 attempts per page)
pub async fn create_event_link_token(
    headers: &StringMap,
    base_url: &str,
    payload: Option<JsonValue>,
) -> LinkTokenOutcome {
    match LinkTokenClient::new(LinkTokenConfig::default()) {
        Ok(client) => {
            client
                .create_event_link_token(headers, base_url, payload)
                .await
        }
        Err(e) => LinkTokenOutcome::Indeterminate(e),
    }
}

#[cfg(test)]
mod tests;
