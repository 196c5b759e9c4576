use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use issue_archive::config::AppConfig;
use issue_archive::create_router;
use issue_archive::summarize::{
    run_summary, MockSummarizer, Summarizer, SummaryInput,
};
use issue_archive::types::{ArchiveError, Result};
use issue_archive::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

fn input() -> SummaryInput {
    SummaryInput {
        title: "Issue".to_string(),
        date: "March 5, 2024".to_string(),
        content: "Some content".to_string(),
    }
}

#[tokio::test]
async fn summary_returns_upstream_text() {
    let summarizer = MockSummarizer::replying("  A tidy summary.  ");
    let summary = run_summary(&summarizer, &input(), Duration::from_secs(1))
        .await
        .expect("summary succeeds");
    assert_eq!(summary, "A tidy summary.");
}

#[tokio::test]
async fn slow_upstream_yields_timeout_class_error() {
    let summarizer = MockSummarizer::replying("too late").with_delay(Duration::from_millis(200));
    let err = run_summary(&summarizer, &input(), Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ArchiveError::SummaryTimeout),
        "expected timeout, got {:?}",
        err
    );
}

#[tokio::test]
async fn empty_upstream_reply_is_a_server_error() {
    let summarizer = MockSummarizer::replying("   ");
    let err = run_summary(&summarizer, &input(), Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ArchiveError::EmptySummary));
}

#[tokio::test]
async fn upstream_failure_keeps_its_status() {
    let summarizer = MockSummarizer::failing(Some(429), "Rate limited");
    let err = run_summary(&summarizer, &input(), Duration::from_secs(1))
        .await
        .unwrap_err();
    match err {
        ArchiveError::SummaryUpstream { status, message } => {
            assert_eq!(status, Some(429));
            assert_eq!(message, "Rate limited");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Counts calls so tests can assert validation happens before any upstream work.
struct CountingSummarizer {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(&self, _input: &SummaryInput) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("counted".to_string())
    }
}

fn test_state(summarizer: Arc<dyn Summarizer>) -> AppState {
    let mut config = AppConfig::default();
    config.summary.timeout = Duration::from_millis(500);
    AppState::new(config, summarizer).expect("state builds")
}

async fn post_summarize(state: AppState, body: Value) -> (StatusCode, Value) {
    let app = create_router(state);
    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");

    let response = app.oneshot(request).await.expect("handler responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

#[tokio::test]
async fn rejects_empty_after_strip_before_any_upstream_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = test_state(Arc::new(CountingSummarizer {
        calls: Arc::clone(&calls),
    }));

    let (status, body) = post_summarize(
        state,
        json!({ "title": "t", "date": "d", "content": "<p></p>" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content is empty after stripping HTML.");
    assert_eq!(calls.load(Ordering::SeqCst), 0, "upstream must not be called");
}

#[tokio::test]
async fn rejects_missing_fields_with_client_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = test_state(Arc::new(CountingSummarizer {
        calls: Arc::clone(&calls),
    }));

    let (status, body) = post_summarize(state, json!({ "title": "only a title" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing title, date, or content.");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_request_returns_summary_json() {
    let state = test_state(Arc::new(MockSummarizer::replying("Three bullet points.")));

    let (status, body) = post_summarize(
        state,
        json!({ "title": "t", "date": "d", "content": "<p>real content</p>" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Three bullet points.");
}

#[tokio::test]
async fn timeout_maps_to_gateway_timeout() {
    let state = test_state(Arc::new(
        MockSummarizer::replying("late").with_delay(Duration::from_secs(2)),
    ));

    let (status, body) = post_summarize(
        state,
        json!({ "title": "t", "date": "d", "content": "<p>real content</p>" }),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"]
        .as_str()
        .expect("error is a string")
        .contains("timed out"));
}

#[tokio::test]
async fn invalid_json_body_is_a_client_error() {
    let state = test_state(Arc::new(MockSummarizer::replying("unused")));
    let app = create_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request builds");

    let response = app.oneshot(request).await.expect("handler responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
