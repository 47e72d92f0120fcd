//! # AuthKit Link
//!
//! Fetches the complete, paginated AuthKit connector collection and
//! packages it, together with the caller's whitelist flag, into the single
//! response an event link token is issued from.
//!
//! ## Features
//!
//! - **Full Pagination**: every page of `POST /v1/authkit`, merged in
//!   page-number order
//! - **Bounded Concurrency**: pages fetched in batches of at most
//!   `max_concurrent_requests` in flight
//! - **Per-page Retry**: exponential backoff (1s, 2s, 4s, ...) per page
//! - **Best-effort Flags**: `authkitWhitelist` lookup that degrades to `false`
//! - **Tagged Outcome**: success, upstream error pass-through, or
//!   indeterminate failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use authkit_link::{create_event_link_token, LinkTokenOutcome, StringMap};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut headers = StringMap::new();
//!     headers.insert("x-pica-secret".into(), "sk_test_...".into());
//!
//!     match create_event_link_token(&headers, "https://api.picaos.com", None).await {
//!         LinkTokenOutcome::Success(result) => println!("{} connectors", result.rows.len()),
//!         LinkTokenOutcome::UpstreamError { body, .. } => println!("upstream: {body}"),
//!         LinkTokenOutcome::Indeterminate(e) => eprintln!("failed: {e}"),
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  create_event_link_token                  │
//! │      flags (best-effort) → pagination (must succeed)      │
//! └───────────────────────────────────────────────────────────┘
//!                │                            │
//! ┌──────────────┴──────────┐  ┌──────────────┴──────────────┐
//! │      Flag Lookup        │  │   Pagination Orchestrator   │
//! │ GET /v1/users/flags     │  │ batches · retry · merge     │
//! └─────────────────────────┘  └──────────────┬──────────────┘
//!                                             │
//!                              ┌──────────────┴──────────────┐
//!                              │        Page Fetcher         │
//!                              │ POST /v1/authkit?limit&page │
//!                              └─────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Single-shot HTTP client
pub mod http;

/// Page fetching and pagination orchestration
pub mod pagination;

/// Whitelist flag lookup
pub mod flags;

/// Configuration loading
pub mod config;

/// Event link token aggregation
pub mod token;

/// Logging setup
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::LinkTokenConfig;
pub use pagination::{AggregatedResult, PageResult, PaginationOptions};
pub use token::{aggregate_link_token, create_event_link_token, LinkTokenClient, LinkTokenOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
