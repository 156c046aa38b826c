//! Integration tests for the Server-Sent Events stream

use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use futures_util::StreamExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::*;
use crate::assert_contains;

/// Read frames until one full SSE event has arrived
async fn next_event<S>(stream: &mut S) -> String
where
    S: futures_util::Stream<Item = Result<axum::body::Bytes, axum::Error>> + Unpin,
{
    let mut buffer = String::new();
    loop {
        let chunk = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for an event")
            .expect("stream ended")
            .expect("stream error");
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        if let Some(end) = buffer.find("\n\n") {
            let event = buffer[..end].to_string();
            if event.starts_with(':') {
                // keep-alive comment
                buffer.drain(..end + 2);
                continue;
            }
            return event;
        }
    }
}

#[tokio::test]
async fn test_event_stream_requires_session() {
    let app = TestApp::without_database();

    let response = app.get("/api/events", None).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    assert!(app.state.presence.online_users().is_empty());
}

#[tokio::test]
async fn test_event_stream_rejects_garbage_cookie() {
    let app = TestApp::without_database();

    let response = app.get("/api/events", Some("token=not-a-jwt")).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_event_stream_presence_and_messages() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);
    let alice = signup_user(&app, "Alice Liddell").await;
    let bob = signup_user(&app, "Bob Builder").await;

    let response = app
        .router
        .clone()
        .oneshot(request(Method::GET, "/api/events", None, Some(&bob.cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_contains!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/event-stream"
    );
    assert!(app.state.presence.is_online(bob.id));

    let mut stream = response.into_body().into_data_stream();

    let presence = next_event(&mut stream).await;
    assert_contains!(presence, "event: getOnlineUsers");
    assert_contains!(presence, &bob.id.to_string());

    let sent = app
        .post_json(
            &format!("/api/messages/send/{}", bob.id),
            json!({ "text": "over the stream" }),
            Some(&alice.cookie),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);

    let message = next_event(&mut stream).await;
    assert_contains!(message, "event: newMessage");
    assert_contains!(message, "over the stream");
    assert_contains!(message, &alice.id.to_string());

    drop(stream);
    assert!(!app.state.presence.is_online(bob.id));
}

#[tokio::test]
async fn test_presence_counts_each_user_once() {
    let app = TestApp::without_database();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let first_tab = app.state.presence.connect(user);
    let second_tab = app.state.presence.connect(user);
    let mut watcher = app.state.presence.connect(other);
    while watcher.try_recv().is_some() {}

    let mut expected = vec![user, other];
    expected.sort();
    assert_eq!(app.state.presence.online_users(), expected);

    drop(first_tab);
    assert!(app.state.presence.is_online(user));
    assert!(watcher.try_recv().is_none());

    drop(second_tab);
    assert!(!app.state.presence.is_online(user));
    let update = watcher.try_recv().expect("others learn the user left");
    assert_eq!(update.payload, json!([other.to_string()]));
}
