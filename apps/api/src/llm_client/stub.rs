//! Canned `CompletionProvider` for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{CompletionProvider, LlmError};

enum Reply {
    Json(Value),
    Status(u16),
    /// Reply content that is not JSON.
    Malformed(String),
}

/// Replies with a fixed value or a fixed failure and records every prompt.
pub struct StubProvider {
    reply: Reply,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubProvider {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: Value) -> Self {
        Self::new(Reply::Json(reply))
    }

    /// Fails as if the provider answered with a non-success `status`.
    pub fn failing(status: u16) -> Self {
        Self::new(Reply::Status(status))
    }

    /// Fails as if the provider returned `content` that does not parse as JSON.
    pub fn malformed(content: &str) -> Self {
        Self::new(Reply::Malformed(content.to_string()))
    }

    /// `(system, user)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn chat_json(&self, system: &str, user: &str) -> Result<Value, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        match &self.reply {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Status(status) => Err(LlmError::Api {
                status: *status,
                message: "stubbed failure".to_string(),
            }),
            Reply::Malformed(content) => {
                serde_json::from_str(content).map_err(LlmError::Parse)
            }
        }
    }
}
