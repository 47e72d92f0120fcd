//! Error types for AuthKit link token aggregation
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Page {page} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Innermost error, looking through retry wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::RetriesExhausted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// HTTP status of the upstream response, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured body returned by the upstream service.
    ///
    /// Only status errors whose body parses as JSON qualify; an empty or
    /// plain-text body is not considered structured.
    pub fn upstream_body(&self) -> Option<Value> {
        match self.root_cause() {
            Error::HttpStatus { body, .. } if !body.trim().is_empty() => {
                serde_json::from_str(body).ok()
            }
            _ => None,
        }
    }

    /// Check if this is a network-level failure (no upstream response)
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::Http(_) | Error::Timeout { .. }
        )
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::decode("unexpected end of input");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: unexpected end of input"
        );

        let err = Error::invalid_value("limit", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'limit': must be greater than 0"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = Error::RetriesExhausted {
            page: 4,
            attempts: 3,
            source: Box::new(Error::http_status(503, "unavailable")),
        };
        assert_eq!(
            err.to_string(),
            "Page 4 failed after 3 attempts: HTTP 503: unavailable"
        );
    }

    #[test]
    fn test_upstream_body_json() {
        let err = Error::http_status(400, r#"{"code":"BAD_REQUEST","message":"nope"}"#);
        assert_eq!(
            err.upstream_body(),
            Some(json!({"code": "BAD_REQUEST", "message": "nope"}))
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_upstream_body_through_retry_wrapper() {
        let err = Error::RetriesExhausted {
            page: 2,
            attempts: 3,
            source: Box::new(Error::http_status(500, r#"{"error":"boom"}"#)),
        };
        assert_eq!(err.upstream_body(), Some(json!({"error": "boom"})));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_upstream_body_absent() {
        assert!(Error::http_status(502, "").upstream_body().is_none());
        assert!(Error::http_status(502, "Bad Gateway").upstream_body().is_none());
        assert!(Error::Timeout { timeout_ms: 10 }.upstream_body().is_none());
        assert!(Error::invalid_value("limit", "x").upstream_body().is_none());
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_transport());
        assert!(!Error::http_status(500, "").is_transport());
        assert!(!Error::decode("bad json").is_transport());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::decode("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Failed to decode response: inner"));
    }
}
