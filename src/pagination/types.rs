//! Pagination types
//!
//! Page results as returned by the upstream collection endpoint, the merged
//! single-page-shaped result, and the options that drive one pagination run.

use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Page Result
// ============================================================================

/// One page of the connector collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Opaque connector records
    #[serde(default)]
    pub rows: Vec<JsonValue>,
    /// Page number (1-based)
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
    /// Total number of records across all pages
    pub total: u64,
    /// Server-assigned request identifier
    #[serde(default)]
    pub request_id: String,
}

// ============================================================================
// Aggregated Result
// ============================================================================

/// Every page merged into one page-shaped result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    /// Rows of all pages in page-number order
    pub rows: Vec<JsonValue>,
    /// Always 1 once merged
    pub page: u32,
    /// Always 1 once merged
    pub pages: u32,
    /// Total record count reported by the first page
    pub total: u64,
    /// Request identifier of the highest page number fetched
    pub request_id: String,
    /// Whitelist flag, attached by the link token aggregator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authkit_whitelist: Option<bool>,
}

impl AggregatedResult {
    /// Attach the whitelist flag
    #[must_use]
    pub fn with_whitelist(mut self, whitelist: bool) -> Self {
        self.authkit_whitelist = Some(whitelist);
        self
    }
}

// ============================================================================
// Pagination Options
// ============================================================================

/// Options for one pagination run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    /// Page size requested from the upstream service
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Maximum page requests in flight at once (batch size)
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Maximum attempts per page, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy between attempts
    #[serde(default)]
    pub backoff_type: BackoffType,

    /// Delay before the second attempt, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Optional cap on any single delay, in milliseconds
    #[serde(default)]
    pub max_backoff_ms: Option<u64>,
}

fn default_limit() -> u32 {
    100
}

fn default_max_concurrent_requests() -> usize {
    3
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_retries: default_max_retries(),
            backoff_type: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: None,
        }
    }
}

impl PaginationOptions {
    /// Create options with the defaults (100 per page, 3 in flight, 3 attempts)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the maximum number of concurrent page requests
    #[must_use]
    pub fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    /// Set the maximum attempts per page
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Option<Duration>) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff_ms = initial.as_millis() as u64;
        self.max_backoff_ms = max.map(|d| d.as_millis() as u64);
        self
    }

    /// Initial backoff delay
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Backoff cap, if any
    pub fn max_backoff(&self) -> Option<Duration> {
        self.max_backoff_ms.map(Duration::from_millis)
    }

    /// Check that the options can drive a pagination run
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::invalid_value("limit", "must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(Error::invalid_value(
                "max_concurrent_requests",
                "must be at least 1",
            ));
        }
        if self.max_retries == 0 {
            return Err(Error::invalid_value("max_retries", "must be at least 1"));
        }
        Ok(())
    }
}
