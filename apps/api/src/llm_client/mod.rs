/// LLM Client — the single point of entry for completion-provider calls.
///
/// No other module talks to the provider directly; flows depend on the
/// `CompletionProvider` trait so tests can substitute a canned reply.
///
/// Model and temperature are fixed: ad copy and negative lists should be
/// reproducible, not creative.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[cfg(test)]
pub mod stub;

pub const OPENAI_API_BASE: &str = "https://api.openai.com";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI HTTP {status}")]
    Api { status: u16, message: String },

    #[error("Malformed completion content: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A chat-completion backend that answers in JSON mode.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one system + user exchange and parses the reply content as JSON.
    async fn chat_json(&self, system: &str, user: &str) -> Result<Value, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    response_format: ResponseFormat<'a>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Absent and `null` both read as no choices.
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice. A missing or empty reply reads as an empty object.
    pub fn text(&self) -> &str {
        self.choices
            .as_deref()
            .and_then(<[Choice]>::first)
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or("{}")
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Chat Completions client for OpenAI.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
        }
    }

    /// Makes a single call to the Chat Completions API. No retries.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("OpenAI API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn chat_json(&self, system: &str, user: &str) -> Result<Value, LlmError> {
        let response = self.call(system, user).await?;
        let text = strip_json_fences(response.text());
        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn completion_body(content: &str) -> String {
        json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        })
        .to_string()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_missing_content_reads_as_empty_object() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(response.text(), "{}");

        let response: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert_eq!(response.text(), "{}");

        let response: ChatResponse =
            serde_json::from_value(json!({"choices": null, "usage": null})).unwrap();
        assert_eq!(response.text(), "{}");

        let response: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "{}");
    }

    #[tokio::test]
    async fn test_null_choices_parse_as_empty_object() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": null}"#)
            .create_async()
            .await;

        let client = OpenAiClient::with_base_url("k".to_string(), &server.url());
        let value = client.chat_json("sys", "usr").await.unwrap();

        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_chat_json_sends_json_mode_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": MODEL,
                "temperature": 0.3,
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(r#"{"items": []}"#))
            .create_async()
            .await;

        let client = OpenAiClient::with_base_url("test-key".to_string(), &server.url());
        let value = client.chat_json("sys", "usr").await.unwrap();

        assert_eq!(value, json!({"items": []}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body(r#"{"error": {"message": "server exploded"}}"#)
            .create_async()
            .await;

        let client = OpenAiClient::with_base_url("k".to_string(), &server.url());
        let err = client.chat_json("sys", "usr").await.unwrap_err();

        match &err {
            LlmError::Api { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "server exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "OpenAI HTTP 500");
    }

    #[tokio::test]
    async fn test_non_json_content_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Sorry, I cannot help with that."))
            .create_async()
            .await;

        let client = OpenAiClient::with_base_url("k".to_string(), &server.url());
        let err = client.chat_json("sys", "usr").await.unwrap_err();

        assert!(matches!(err, LlmError::Parse(_)));
    }
}
