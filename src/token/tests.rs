//! Tests for link token aggregation

use super::*;
use crate::error::Error;
use crate::pagination::tests::FakeFetcher;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Flag source with a fixed answer
struct StaticFlags {
    flag: Option<bool>,
    calls: AtomicUsize,
}

impl StaticFlags {
    fn returning(flag: bool) -> Self {
        Self {
            flag: Some(flag),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            flag: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FlagSource for StaticFlags {
    async fn whitelist_flag(&self) -> crate::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.flag.ok_or_else(|| Error::http_status(500, "flags down"))
    }
}

#[tokio::test(start_paused = true)]
async fn test_flag_attached_to_result() {
    let flags = StaticFlags::returning(true);
    let fetcher = FakeFetcher::new(3, 6);

    let outcome =
        aggregate_link_token(Some(&flags), &fetcher, &PaginationOptions::default()).await;

    let aggregated = outcome.aggregated().unwrap();
    assert_eq!(aggregated.authkit_whitelist, Some(true));
    assert_eq!(aggregated.rows.len(), 6);
    assert_eq!(aggregated.page, 1);
    assert_eq!(aggregated.pages, 1);
    assert_eq!(flags.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_flag_failure_defaults_to_false() {
    let flags = StaticFlags::failing();
    let fetcher = FakeFetcher::new(2, 4);

    let outcome =
        aggregate_link_token(Some(&flags), &fetcher, &PaginationOptions::default()).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.aggregated().unwrap().authkit_whitelist, Some(false));
    assert_eq!(fetcher.calls(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_without_flags() {
    let fetcher = FakeFetcher::new(1, 2);

    let outcome = aggregate_link_token(None, &fetcher, &PaginationOptions::default()).await;

    let json = outcome.to_json().unwrap();
    assert!(json.get("authkitWhitelist").is_none());
    assert_eq!(json["requestId"], "req-1");
    assert_eq!(json["total"], 2);
}

#[tokio::test(start_paused = true)]
async fn test_structured_failure_passes_body_through() {
    let flags = StaticFlags::returning(true);
    let fetcher = FakeFetcher::new(3, 6)
        .failing(2, u32::MAX)
        .with_failure_body(r#"{"type":"UNAVAILABLE","message":"try later"}"#);

    let outcome =
        aggregate_link_token(Some(&flags), &fetcher, &PaginationOptions::default()).await;

    match &outcome {
        LinkTokenOutcome::UpstreamError { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, &json!({"type": "UNAVAILABLE", "message": "try later"}));
        }
        other => panic!("Expected UpstreamError, got {other:?}"),
    }
    assert_eq!(
        outcome.to_json(),
        Some(json!({"type": "UNAVAILABLE", "message": "try later"}))
    );
    assert_eq!(fetcher.calls_for(2), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unstructured_failure_is_indeterminate() {
    let fetcher = FakeFetcher::new(3, 6)
        .failing(3, u32::MAX)
        .with_failure_body("Service Unavailable");

    let outcome = aggregate_link_token(None, &fetcher, &PaginationOptions::default()).await;

    assert!(matches!(outcome, LinkTokenOutcome::Indeterminate(_)));
    assert!(outcome.to_json().is_none());
    assert!(outcome.into_result().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_flag_failure_and_pagination_failure_are_independent() {
    let flags = StaticFlags::failing();
    let fetcher = FakeFetcher::new(2, 4).failing(1, 1);

    let outcome =
        aggregate_link_token(Some(&flags), &fetcher, &PaginationOptions::default()).await;

    // Page 1 is not retried; its JSON body is passed through
    assert!(matches!(
        outcome,
        LinkTokenOutcome::UpstreamError { status: 503, .. }
    ));
}

#[test]
fn test_outcome_from_result() {
    let ok: crate::Result<_> = Ok(crate::pagination::AggregatedResult {
        rows: vec![],
        page: 1,
        pages: 1,
        total: 0,
        request_id: "r".to_string(),
        authkit_whitelist: None,
    });
    assert!(LinkTokenOutcome::from(ok).is_success());

    let timeout = LinkTokenOutcome::from_error(Error::Timeout { timeout_ms: 5 });
    assert!(matches!(timeout, LinkTokenOutcome::Indeterminate(Error::Timeout { .. })));

    let passed = LinkTokenOutcome::from_error(Error::http_status(422, r#"{"code":422}"#));
    match passed.into_result() {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 422);
            assert_eq!(body, r#"{"code":422}"#);
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_invalid_base_url_is_indeterminate() {
    let client = LinkTokenClient::new(LinkTokenConfig::default()).unwrap();

    let outcome = client
        .create_event_link_token(&StringMap::new(), "not a url", None)
        .await;

    assert!(matches!(
        outcome,
        LinkTokenOutcome::Indeterminate(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_client_rejects_invalid_config() {
    let config = LinkTokenConfig::default()
        .with_pagination(PaginationOptions::new().max_concurrent_requests(0));
    assert!(LinkTokenClient::new(config).is_err());
}
