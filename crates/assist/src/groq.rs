//! Groq chat-completions client (OpenAI-compatible wire format).

use std::time::Duration;

use async_trait::async_trait;
use formcraft_core::error::CoreError;
use formcraft_core::suggestions::SuggestionProvider;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_success, ProviderError};
use crate::MAX_TOKENS;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f32 = 0.7;

pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if non-empty.
    pub(crate) fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|t| !t.trim().is_empty())
    }
}

impl GroqProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_base_url(api_key: String, timeout: Duration, base_url: String) -> Self {
        Self {
            client: crate::http_client(timeout),
            api_key,
            base_url,
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let reply: ChatResponse = ensure_success(response).await?.json().await?;
        reply.into_text().ok_or(ProviderError::EmptyReply)
    }
}

#[async_trait]
impl SuggestionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CoreError> {
        tracing::info!(provider = "groq", model = MODEL, "Requesting AI suggestions");
        self.request(prompt).await.map_err(|e| {
            tracing::warn!(provider = "groq", error = %e, "Suggestion request failed");
            e.into_core("Groq")
        })
    }
}
