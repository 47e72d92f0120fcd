//! Common types used throughout the crate
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values (headers, query params)
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff between page fetch retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_type_serde() {
        let parsed: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
        assert_eq!(
            serde_json::to_string(&BackoffType::Constant).unwrap(),
            "\"constant\""
        );
    }
}
