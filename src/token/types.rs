//! Link token outcome types

use crate::error::{Error, Result};
use crate::pagination::AggregatedResult;
use crate::types::JsonValue;

/// Outcome of one link token aggregation
#[derive(Debug)]
pub enum LinkTokenOutcome {
    /// Every page fetched and merged
    Success(AggregatedResult),

    /// Pagination failed and the upstream service answered with a
    /// structured error body, passed through to the caller as-is
    UpstreamError {
        /// HTTP status of the failing upstream response
        status: u16,
        /// Parsed upstream error body
        body: JsonValue,
    },

    /// Pagination failed without a structured upstream body (transport
    /// failure, empty or non-JSON error body, invalid input)
    Indeterminate(Error),
}

impl LinkTokenOutcome {
    /// Classify a pagination failure
    pub fn from_error(error: Error) -> Self {
        match (error.status(), error.upstream_body()) {
            (Some(status), Some(body)) => Self::UpstreamError { status, body },
            _ => Self::Indeterminate(error),
        }
    }

    /// Check if aggregation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Aggregated result, if aggregation succeeded
    pub fn aggregated(&self) -> Option<&AggregatedResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Value handed to the token-issuance caller.
    ///
    /// `None` only for [`LinkTokenOutcome::Indeterminate`].
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            Self::Success(result) => serde_json::to_value(result).ok(),
            Self::UpstreamError { body, .. } => Some(body.clone()),
            Self::Indeterminate(_) => None,
        }
    }

    /// Collapse into a plain `Result`, treating pass-through bodies as errors
    pub fn into_result(self) -> Result<AggregatedResult> {
        match self {
            Self::Success(result) => Ok(result),
            Self::UpstreamError { status, body } => Err(Error::http_status(status, body.to_string())),
            Self::Indeterminate(error) => Err(error),
        }
    }
}

impl From<Result<AggregatedResult>> for LinkTokenOutcome {
    fn from(result: Result<AggregatedResult>) -> Self {
        match result {
            Ok(aggregated) => Self::Success(aggregated),
            Err(error) => Self::from_error(error),
        }
    }
}
