//! Pagination orchestration
//!
//! Drives a [`PageFetcher`] across every page of the collection:
//!
//! 1. Page 1 is fetched once to learn `pages` and `total`.
//! 2. Pages `2..=pages` are split into batches of `max_concurrent_requests`.
//!    A batch runs its fetches concurrently on the calling task and must
//!    fully resolve before the next batch starts.
//! 3. Every fetch inside a batch retries with backoff; a page that exhausts
//!    its attempts fails the whole run.
//! 4. Rows are concatenated in page-number order, whatever the completion
//!    order was.

use super::fetcher::PageFetcher;
use super::types::{AggregatedResult, PageResult, PaginationOptions};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use futures::future::try_join_all;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Delay to wait after the given failed attempt (1-based).
///
/// With the default options this is 1000ms, 2000ms, 4000ms, ...
pub fn calculate_backoff(options: &PaginationOptions, attempt: u32) -> Duration {
    let initial = options.initial_backoff_ms;
    let step = attempt.saturating_sub(1);

    let delay_ms = match options.backoff_type {
        BackoffType::Constant => initial,
        BackoffType::Linear => initial.saturating_mul(u64::from(attempt.max(1))),
        BackoffType::Exponential => initial.saturating_mul(2u64.saturating_pow(step)),
    };

    let delay_ms = match options.max_backoff_ms {
        Some(max) => delay_ms.min(max),
        None => delay_ms,
    };

    Duration::from_millis(delay_ms)
}

/// Fetch one page, retrying failures up to `options.max_retries` attempts
pub async fn fetch_with_retry(
    fetcher: &dyn PageFetcher,
    page: u32,
    options: &PaginationOptions,
) -> Result<PageResult> {
    options.validate()?;
    let max_attempts = options.max_retries;
    let mut attempt = 1;

    loop {
        match fetcher.fetch_page(page, options.limit).await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts => {
                let delay = calculate_backoff(options, attempt);
                warn!(
                    page,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Page fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(Error::RetriesExhausted {
                    page,
                    attempts: attempt,
                    source: Box::new(e),
                })
            }
        }
    }
}

/// Fetch every page and merge them into one result.
///
/// The result always has `page = pages = 1`, including for an empty
/// collection. Any page that cannot be fetched aborts the run; no partial
/// result is produced.
pub async fn fetch_all_pages(
    fetcher: &dyn PageFetcher,
    options: &PaginationOptions,
) -> Result<AggregatedResult> {
    options.validate()?;

    let first = fetcher.fetch_page(1, options.limit).await?;
    let last_page = first.pages;
    if last_page <= 1 {
        debug!(total = first.total, "Single page collection");
        return Ok(merge_pages(first, Vec::new()));
    }

    // `pages` comes from upstream; batches are built from the range, never
    // materialised up front
    let batch_size = u32::try_from(options.max_concurrent_requests).unwrap_or(u32::MAX);
    let mut fetched = Vec::new();
    let mut start_page = 2u32;

    loop {
        let end_page = start_page.saturating_add(batch_size - 1).min(last_page);
        debug!(start_page, end_page, "Fetching page batch");

        let pages = try_join_all(
            (start_page..=end_page).map(|page| fetch_with_retry(fetcher, page, options)),
        )
        .await
        .map_err(|e| {
            error!(start_page, error = %e, "Page batch failed");
            e
        })?;

        fetched.extend(pages);

        if end_page >= last_page {
            break;
        }
        start_page = end_page + 1;
    }

    let merged = merge_pages(first, fetched);
    info!(
        pages = last_page,
        rows = merged.rows.len(),
        total = merged.total,
        "Fetched all connector pages"
    );
    Ok(merged)
}

/// Merge page 1 with the remaining pages, which must be in page-number order
pub fn merge_pages(first: PageResult, rest: Vec<PageResult>) -> AggregatedResult {
    let request_id = rest
        .last()
        .map_or_else(|| first.request_id.clone(), |last| last.request_id.clone());

    let capacity = first.rows.len() + rest.iter().map(|p| p.rows.len()).sum::<usize>();
    let mut rows = Vec::with_capacity(capacity);
    rows.extend(first.rows);
    for page in rest {
        rows.extend(page.rows);
    }

    AggregatedResult {
        rows,
        page: 1,
        pages: 1,
        total: first.total,
        request_id,
        authkit_whitelist: None,
    }
}
