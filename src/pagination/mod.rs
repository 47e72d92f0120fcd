//! Pagination module
//!
//! Turns the paged AuthKit collection endpoint into one complete result.
//!
//! # Overview
//!
//! - [`PageFetcher`] issues a single page request (no retry)
//! - [`fetch_all_pages`] drives a fetcher over every page with bounded
//!   concurrency and per-page retry, then merges the pages
//! - [`PaginationOptions`] controls page size, batch size and backoff

mod fetcher;
mod orchestrator;
mod types;

pub use fetcher::{validate_page_args, HttpPageFetcher, PageFetcher, AUTHKIT_PATH};
pub(crate) use fetcher::endpoint_url;
pub use orchestrator::{calculate_backoff, fetch_all_pages, fetch_with_retry, merge_pages};
pub use types::{AggregatedResult, PageResult, PaginationOptions};
