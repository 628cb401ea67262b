//! Test doubles shared by the relay-bot integration tests.
//!
//! [`MockBot`] records every outbound message through an mpsc channel; [`MockLlmClient`] returns
//! scripted results and counts calls, so tests can assert on replies without Telegram or Groq.

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use llm_client::{ChatMessage, LlmClient};
use relay_bot::{Bot, Chat, Message, RelayError, Result, User};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// One recorded `send_message(chat, text)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

pub type MockBotReceiver = mpsc::UnboundedReceiver<SentRecord>;

/// Mock Bot that forwards each send to the test through a channel.
pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<SentRecord>,
    fail: bool,
}

impl MockBot {
    pub fn with_receiver() -> (Arc<Self>, MockBotReceiver) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: false }), sent_rx)
    }

    /// A bot whose sends always fail (after being recorded).
    pub fn failing() -> (Arc<Self>, MockBotReceiver) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: true }), sent_rx)
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let _ = self.sent_tx.send(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
        });
        if self.fail {
            return Err(RelayError::Bot("chat not found".to_string()));
        }
        Ok(())
    }
}

/// Mock LLM client returning scripted results in order; the last one repeats.
pub struct MockLlmClient {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl MockLlmClient {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::scripted(vec![Ok(text.to_string())])
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Self::scripted(vec![Err(error.to_string())])
    }

    pub fn scripted(script: Vec<std::result::Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages;
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!("no scripted response")),
        }
    }
}

pub fn make_message(chat_id: i64, content: &str) -> Message {
    Message::incoming_text(
        "42",
        User {
            id: 1001,
            username: Some("liedson".to_string()),
            first_name: Some("Liedson".to_string()),
            last_name: None,
        },
        Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content,
    )
}

/// Waits for the next recorded send, failing the test after a few seconds.
pub async fn next_sent(rx: &mut MockBotReceiver) -> SentRecord {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a reply")
        .expect("bot channel closed")
}

/// Asserts that nothing else is sent within a short grace period.
pub async fn assert_no_more_sent(rx: &mut MockBotReceiver) {
    let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(
        !matches!(extra, Ok(Some(_))),
        "unexpected extra send: {:?}",
        extra
    );
}
