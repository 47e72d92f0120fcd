//! HTTP client module
//!
//! Provides the single-shot HTTP client used by the page fetcher and the
//! flag lookup.
//!
//! # Features
//!
//! - **JSON in, JSON out**: request bodies and responses are `serde` values
//! - **Error Classification**: timeouts, transport failures and non-2xx
//!   statuses map to distinct error variants
//! - **Header Merging**: default headers plus caller-supplied headers

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
