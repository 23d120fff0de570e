#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{Json, Router, extract::State, routing::post};
use vacancy_relay::{Channel, TELEGRAM_MAX_MESSAGE_LENGTH, TelegramChannel, split_message_for_telegram};

#[derive(Clone, Default)]
struct SendMockState {
    requests: Arc<Mutex<Vec<serde_json::Value>>>,
    reject_html: bool,
}

async fn handle_send_message(
    State(state): State<SendMockState>,
    Json(body): Json<serde_json::Value>,
) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    let has_parse_mode = body.get("parse_mode").is_some();
    state.requests.lock().expect("requests lock").push(body);
    if state.reject_html && has_parse_mode {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: can't parse entities: Unsupported start tag \"x\""
            })),
        );
    }
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({"ok": true, "result": {"message_id": 1}})),
    )
}

async fn spawn_send_mock(
    reject_html: bool,
) -> Result<Option<(String, SendMockState, tokio::task::JoinHandle<()>)>> {
    let state = SendMockState {
        reject_html,
        ..SendMockState::default()
    };
    let app = Router::new()
        .route("/botfake-token/sendMessage", post(handle_send_message))
        .with_state(state.clone());
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping telegram send tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Some((format!("http://{addr}"), state, handle)))
}

#[tokio::test]
async fn send_uses_html_parse_mode() -> Result<()> {
    let Some((api_base, state, handle)) = spawn_send_mock(false).await? else {
        return Ok(());
    };
    let channel = TelegramChannel::new_with_base_url("fake-token".to_string(), api_base);

    channel.send("<i>golang</i>", "42").await?;

    let requests = state.requests.lock().expect("requests lock").clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["chat_id"], "42");
    assert_eq!(requests[0]["text"], "<i>golang</i>");
    assert_eq!(requests[0]["parse_mode"], "HTML");

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn send_falls_back_to_plain_text_on_entity_error() -> Result<()> {
    let Some((api_base, state, handle)) = spawn_send_mock(true).await? else {
        return Ok(());
    };
    let channel = TelegramChannel::new_with_base_url("fake-token".to_string(), api_base);

    channel.send("<x>broken</x>", "42").await?;

    let requests = state.requests.lock().expect("requests lock").clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["parse_mode"], "HTML");
    assert!(requests[1].get("parse_mode").is_none());
    assert_eq!(requests[1]["text"], "<x>broken</x>");

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn long_messages_are_sent_in_chunks() -> Result<()> {
    let Some((api_base, state, handle)) = spawn_send_mock(false).await? else {
        return Ok(());
    };
    let channel = TelegramChannel::new_with_base_url("fake-token".to_string(), api_base);
    let line = "x".repeat(100);
    let message = vec![line; 60].join("\n");

    channel.send(&message, "42").await?;

    let requests = state.requests.lock().expect("requests lock").clone();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let text = request["text"].as_str().expect("text");
        assert!(text.chars().count() <= TELEGRAM_MAX_MESSAGE_LENGTH);
    }

    handle.abort();
    Ok(())
}

#[test]
fn short_message_is_one_chunk() {
    assert_eq!(split_message_for_telegram("hello"), vec!["hello".to_string()]);
}
