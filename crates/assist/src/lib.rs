//! Outbound AI providers for form field suggestions.
//!
//! Each provider implements [`SuggestionProvider`] from `formcraft-core`.
//! The concrete provider is chosen once at startup by
//! [`provider_from_config`] and shared behind an `Arc`.

pub mod anthropic;
pub mod disabled;
pub mod error;
pub mod groq;

use std::sync::Arc;
use std::time::Duration;

use formcraft_core::suggestions::SuggestionProvider;

pub use anthropic::AnthropicProvider;
pub use disabled::DisabledProvider;
pub use error::ProviderError;
pub use groq::GroqProvider;

/// Upper bound on generated tokens for one suggestion request.
pub const MAX_TOKENS: u32 = 1024;

/// Which hosted model backs the suggestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Anthropic,
}

impl ProviderKind {
    /// Parse an `AI_PROVIDER` value. Unknown values fall back to Groq.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => ProviderKind::Anthropic,
            _ => ProviderKind::Groq,
        }
    }
}

/// Provider settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub provider: ProviderKind,
    pub groq_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub request_timeout: Duration,
}

/// Build the configured provider.
///
/// A provider whose API key is missing or blank is replaced by a
/// [`DisabledProvider`] so the server still starts.
pub fn provider_from_config(config: &AssistConfig) -> Arc<dyn SuggestionProvider> {
    match config.provider {
        ProviderKind::Groq => match non_blank(&config.groq_api_key) {
            Some(api_key) => Arc::new(GroqProvider::new(api_key, config.request_timeout)),
            None => {
                tracing::warn!("GROQ_API_KEY not set, AI suggestions disabled");
                Arc::new(DisabledProvider::new("Groq", "GROQ_API_KEY"))
            }
        },
        ProviderKind::Anthropic => match non_blank(&config.claude_api_key) {
            Some(api_key) => Arc::new(AnthropicProvider::new(api_key, config.request_timeout)),
            None => {
                tracing::warn!("CLAUDE_API_KEY not set, AI suggestions disabled");
                Arc::new(DisabledProvider::new("Anthropic", "CLAUDE_API_KEY"))
            }
        },
    }
}

fn non_blank(key: &Option<String>) -> Option<String> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Build a `reqwest` client with the given request timeout.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to a default HTTP client without a timeout");
            reqwest::Client::new()
        })
}
