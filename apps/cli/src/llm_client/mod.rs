//! Language-model access for the customizer.
//!
//! Every model call goes through [`LlmClient`], and callers only see it as a
//! [`JsonModel`]. A failed call is fatal for the step that made it; nothing is
//! retried.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("API key not found. Set ANTHROPIC_API_KEY or pass --api-key")]
    MissingApiKey,
}

/// A model that answers a prompt with one JSON value.
#[async_trait]
pub trait JsonModel: Send + Sync {
    async fn complete_json(&self, prompt: &str, system: &str) -> Result<serde_json::Value, LlmError>;

    /// Identifier recorded in variant manifests.
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserTurn<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

/// Reply body of the Messages API, reduced to what the customizer reads.
#[derive(Debug, Deserialize)]
pub struct MessagesReply {
    pub content: Vec<Block>,
    pub usage: TokenUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl MessagesReply {
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            Block::Text { text } => Some(text.as_str()),
            Block::Other => None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Fails with `MissingApiKey` when no non-blank key is given.
    pub fn new(api_key: Option<String>, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
            return Err(LlmError::MissingApiKey);
        };
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, api_key, model })
    }

    /// One Messages API round trip.
    pub async fn send(&self, prompt: &str, system: &str) -> Result<MessagesReply, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserTurn { role: "user", content: prompt }],
        };

        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(raw),
            });
        }

        let reply: MessagesReply = response.json().await?;
        debug!(
            model = %self.model,
            input_tokens = reply.usage.input_tokens,
            output_tokens = reply.usage.output_tokens,
            "Model call completed"
        );
        Ok(reply)
    }
}

#[async_trait]
impl JsonModel for LlmClient {
    async fn complete_json(&self, prompt: &str, system: &str) -> Result<serde_json::Value, LlmError> {
        let reply = self.send(prompt, system).await?;
        parse_json_text(reply.first_text().ok_or(LlmError::EmptyContent)?)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// `error.message` from an API error body, or the body itself.
fn api_error_message(raw: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&raw) {
        Ok(envelope) => envelope.error.message,
        Err(_) => raw,
    }
}

/// Parses model text as JSON after removing any markdown fence.
pub fn parse_json_text<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let payload = strip_json_fences(text);
    if payload.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(serde_json::from_str(payload)?)
}

/// Unwraps a ```` ``` ```` or ```` ```json ```` fence; unfenced text is only trimmed.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner).trim_start();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
