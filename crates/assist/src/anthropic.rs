//! Anthropic messages API client.

use std::time::Duration;

use async_trait::async_trait;
use formcraft_core::error::CoreError;
use formcraft_core::suggestions::SuggestionProvider;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_success, ProviderError};
use crate::MAX_TOKENS;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first `text` content block.
    pub(crate) fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.kind == "text")
            .and_then(|b| b.text)
            .filter(|t| !t.trim().is_empty())
    }
}

impl AnthropicProvider {
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
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let reply: MessagesResponse = ensure_success(response).await?.json().await?;
        reply.into_text().ok_or(ProviderError::EmptyReply)
    }
}

#[async_trait]
impl SuggestionProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CoreError> {
        tracing::info!(provider = "anthropic", model = MODEL, "Requesting AI suggestions");
        self.request(prompt).await.map_err(|e| {
            tracing::warn!(provider = "anthropic", error = %e, "Suggestion request failed");
            e.into_core("Anthropic")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_text_block() {
        let reply: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg","content":[{"type":"tool_use","id":"t"},{"type":"text","text":"[1]"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("[1]"));
    }

    #[test]
    fn no_text_block_yields_nothing() {
        let reply: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(reply.into_text().is_none());
    }
}
