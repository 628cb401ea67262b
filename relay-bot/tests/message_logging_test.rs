//! The text of an inbound message is logged exactly once per delivery (by `LoggingHandler`).
//!
//! Runs on the current-thread test runtime so the scoped subscriber also sees the spawned
//! handler task.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{next_sent, MockBot, MockLlmClient};
use relay_bot::{build_handler_chain, build_router, AppState, TransportMode};
use serde_json::json;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_webhook_message_text_logged_once() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (bot, mut sent) = MockBot::with_receiver();
    let chain = build_handler_chain(bot, MockLlmClient::replying("tudo certo"));
    let app = build_router(AppState::new(chain, TransportMode::Webhook));

    let update = json!({
        "update_id": 10001,
        "message": {
            "message_id": 7,
            "date": 1706529600,
            "chat": {"id": 555, "type": "private", "first_name": "Liedson"},
            "from": {"id": 1001, "is_bot": false, "first_name": "Liedson"},
            "text": "marcador-unico-4711"
        }
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(next_sent(&mut sent).await.text, "tudo certo");

    let output = logs.text();
    assert_eq!(
        output.matches("marcador-unico-4711").count(),
        1,
        "message text should be logged once:\n{}",
        output
    );
    assert!(output.contains("Webhook update accepted"));
}
