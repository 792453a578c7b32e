//! API integration tests for the text endpoints.
//!
//! Tests verify:
//! - Chat, summarize and extract responses for valid requests
//! - Default handling of missing fields
//! - The public health endpoint

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use text_gateway::{ChatResponse, ExtractResponse, SummarizeResponse};

use super::test_utils::{bearer, post_json, read_json, test_router, TEST_TOKEN};

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_reply() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json("/chat", &json!({"message": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"reply": "You said: hi"}));
}

#[tokio::test]
async fn test_chat_missing_message_defaults_to_empty() {
    let (router, _) = test_router();

    let response = router.oneshot(post_json("/chat", &json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"reply": "You said: "}));
}

#[tokio::test]
async fn test_chat_typed_response() {
    let (router, _) = test_router();
    let body = json!({"message": "hello there"});

    let response = router.oneshot(post_json("/chat", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply: ChatResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(reply.reply, "You said: hello there");
}

#[tokio::test]
async fn test_chat_ignores_extra_fields() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json("/chat", &json!({"message": "hi", "user": 7})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"reply": "You said: hi"}));
}

// =============================================================================
// Summarize
// =============================================================================

#[tokio::test]
async fn test_summarize_short_text_unchanged() {
    let (router, _) = test_router();
    let text = "A short piece of text.";

    let response = router
        .oneshot(post_json("/summarize", &json!({ "text": text })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "summary": text }));
}

#[tokio::test]
async fn test_summarize_exactly_fifty_unchanged() {
    let (router, _) = test_router();
    let text = "x".repeat(50);

    let response = router
        .oneshot(post_json("/summarize", &json!({ "text": text })))
        .await
        .unwrap();

    assert_eq!(read_json(response).await, json!({ "summary": text }));
}

#[tokio::test]
async fn test_summarize_truncates_long_text() {
    let (router, _) = test_router();
    let text = "a".repeat(60);

    let response = router
        .oneshot(post_json("/summarize", &json!({ "text": text })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary: SummarizeResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(summary.summary, format!("{}...", "a".repeat(50)));
}

#[tokio::test]
async fn test_summarize_accepts_large_body() {
    let (router, sink) = test_router();
    // Well past axum's default 2 MiB body limit
    let text = "x".repeat(3 * 1024 * 1024);

    let response = router
        .oneshot(post_json("/summarize", &json!({ "text": text })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary: SummarizeResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(summary.summary, format!("{}...", "x".repeat(50)));
    assert_eq!(
        sink.tags(),
        vec!["summarize_request_received", "summarize_response_sent"]
    );
}

#[tokio::test]
async fn test_summarize_counts_characters_not_bytes() {
    let (router, _) = test_router();
    let text = "日本".repeat(30); // 60 characters, 180 bytes

    let response = router
        .oneshot(post_json("/summarize", &json!({ "text": text })))
        .await
        .unwrap();

    let summary: SummarizeResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(summary.summary, format!("{}...", "日本".repeat(25)));
}

#[tokio::test]
async fn test_summarize_missing_text_defaults_to_empty() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json("/summarize", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"summary": ""}));
}

// =============================================================================
// Extract
// =============================================================================

#[tokio::test]
async fn test_extract_keywords() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json(
            "/extract",
            &json!({"text": "hello world foobar hi ok"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"keywords": ["foobar"]}));
}

#[tokio::test]
async fn test_extract_preserves_order() {
    let (router, _) = test_router();
    let body = json!({"text": "Rustacean writes concurrent servers daily"});

    let response = router.oneshot(post_json("/extract", &body)).await.unwrap();

    let extracted: ExtractResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(
        extracted.keywords,
        vec!["Rustacean", "writes", "concurrent", "servers"]
    );
}

#[tokio::test]
async fn test_extract_empty_text() {
    let (router, _) = test_router();

    let response = router
        .oneshot(post_json("/extract", &json!({"text": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"keywords": []}));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let (router, sink) = test_router();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    assert!(sink.events().is_empty());
}

// =============================================================================
// OPTIONS
// =============================================================================

#[tokio::test]
async fn test_options_lists_allowed_methods() {
    for (path, allow) in [
        ("/chat", "OPTIONS, POST"),
        ("/summarize", "OPTIONS, POST"),
        ("/extract", "OPTIONS, POST"),
        ("/health", "GET, HEAD, OPTIONS"),
    ] {
        let (router, sink) = test_router();

        let request = Request::builder()
            .method("OPTIONS")
            .uri(path)
            .header(header::AUTHORIZATION, bearer(TEST_TOKEN))
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
        assert_eq!(response.headers()[header::ALLOW], allow, "path {}", path);
        assert!(sink.events().is_empty(), "no events for OPTIONS {}", path);
    }
}
