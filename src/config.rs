//! Configuration for link token aggregation
//!
//! [`LinkTokenConfig`] groups the HTTP client settings, the pagination
//! options and the flag lookup switch. It can be built in code or loaded
//! from YAML / JSON with per-field defaults.

use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use crate::pagination::PaginationOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Convert to an HTTP client config
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

// ============================================================================
// Link Token Config
// ============================================================================

/// Complete configuration for [`crate::token::LinkTokenClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTokenConfig {
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Pagination options
    #[serde(default)]
    pub pagination: PaginationOptions,

    /// Whether to look up the whitelist flag before paginating
    #[serde(default = "default_include_flags")]
    pub include_flags: bool,
}

fn default_include_flags() -> bool {
    true
}

impl Default for LinkTokenConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            pagination: PaginationOptions::default(),
            include_flags: default_include_flags(),
        }
    }
}

impl LinkTokenConfig {
    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Invalid link token config")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid link token config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than 0",
            ));
        }
        self.pagination.validate()
    }

    /// Set the pagination options
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationOptions) -> Self {
        self.pagination = pagination;
        self
    }

    /// Enable or disable the flag lookup
    #[must_use]
    pub fn with_flags(mut self, include_flags: bool) -> Self {
        self.include_flags = include_flags;
        self
    }
}
