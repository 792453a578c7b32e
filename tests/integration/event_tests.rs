//! Lifecycle event integration tests.
//!
//! Tests verify:
//! - Received and sent events carry the full bodies
//! - All events of one request share one request id
//! - Different requests get different request ids

use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use super::test_utils::{post_json, test_router};

#[tokio::test]
async fn test_chat_emits_received_then_sent() {
    let (router, sink) = test_router();

    router
        .oneshot(post_json("/chat", &json!({"message": "hi"})))
        .await
        .unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["event"], "chat_request_received");
    assert_eq!(lines[0]["payload"], json!({"message": "hi"}));

    assert_eq!(lines[1]["event"], "chat_response_sent");
    assert_eq!(lines[1]["response"], json!({"reply": "You said: hi"}));
}

#[tokio::test]
async fn test_event_names_per_endpoint() {
    for (path, name) in [
        ("/chat", "chat"),
        ("/summarize", "summarize"),
        ("/extract", "extract"),
    ] {
        let (router, sink) = test_router();

        router
            .oneshot(post_json(path, &json!({"text": "abc", "message": "abc"})))
            .await
            .unwrap();

        assert_eq!(
            sink.tags(),
            vec![
                format!("{}_request_received", name),
                format!("{}_response_sent", name)
            ]
        );
    }
}

#[tokio::test]
async fn test_request_id_shared_within_request() {
    let (router, sink) = test_router();

    router
        .oneshot(post_json("/extract", &json!({"text": "bananas and apples"})))
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);

    let received_id = events[0].request_id.clone().unwrap();
    let sent_id = events[1].request_id.clone().unwrap();
    assert_eq!(received_id, sent_id);

    // Ids are UUIDv4
    assert_eq!(Uuid::parse_str(&received_id).unwrap().get_version_num(), 4);
}

#[tokio::test]
async fn test_request_id_shared_with_error_event() {
    let (router, sink) = test_router();

    router
        .oneshot(post_json("/chat", &json!({"message": false})))
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, "chat_request_received");
    assert_eq!(events[1].event, "error");
    assert!(events[1].request_id.is_some());
    assert_eq!(events[0].request_id, events[1].request_id);
}

#[tokio::test]
async fn test_request_ids_differ_between_requests() {
    let (router, sink) = test_router();

    router
        .clone()
        .oneshot(post_json("/chat", &json!({"message": "one"})))
        .await
        .unwrap();
    router
        .oneshot(post_json("/chat", &json!({"message": "two"})))
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].request_id, events[1].request_id);
    assert_eq!(events[2].request_id, events[3].request_id);
    assert_ne!(events[0].request_id, events[2].request_id);
}

#[tokio::test]
async fn test_concurrent_requests_keep_ids_isolated() {
    let (router, sink) = test_router();

    let mut handles = Vec::new();
    for i in 0..16 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            router
                .oneshot(post_json("/chat", &json!({ "message": format!("m{}", i) })))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 32);

    // Every message appears with exactly one request id in both events
    for i in 0..16 {
        let message = format!("m{}", i);
        let reply = format!("You said: m{}", i);

        let received: Vec<_> = lines
            .iter()
            .filter(|l| l["payload"]["message"] == message.as_str())
            .collect();
        let sent: Vec<_> = lines
            .iter()
            .filter(|l| l["response"]["reply"] == reply.as_str())
            .collect();

        assert_eq!(received.len(), 1);
        assert_eq!(sent.len(), 1);
        assert_eq!(received[0]["request_id"], sent[0]["request_id"]);
    }
}

#[tokio::test]
async fn test_serialized_line_shape() {
    let (router, sink) = test_router();

    router
        .oneshot(post_json("/summarize", &json!({"text": "tiny"})))
        .await
        .unwrap();

    let events = sink.events();
    let line = events[1].to_line().unwrap();
    let request_id = events[1].request_id.clone().unwrap();

    assert_eq!(
        line,
        format!(
            r#"{{"event":"summarize_response_sent","request_id":"{}","response":{{"summary":"tiny"}}}}"#,
            request_id
        )
    );
}
