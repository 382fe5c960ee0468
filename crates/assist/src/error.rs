use formcraft_core::error::CoreError;

/// Errors from the provider HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// A 2xx reply whose body did not contain any text.
    #[error("Provider reply contained no text")]
    EmptyReply,
}

impl ProviderError {
    /// Translate into the domain taxonomy, naming the provider in the message.
    pub fn into_core(self, provider: &str) -> CoreError {
        match self {
            ProviderError::ApiError { status: 401, .. } => {
                CoreError::Upstream(format!("{provider} rejected the request: invalid API key"))
            }
            ProviderError::ApiError { status: 429, .. } => CoreError::RateLimited(format!(
                "{provider} rate limit exceeded. Please try again later"
            )),
            ProviderError::ApiError { status, .. } if status >= 500 => {
                CoreError::Upstream(format!("{provider} service is currently unavailable"))
            }
            ProviderError::ApiError { status, .. } => {
                CoreError::Upstream(format!("{provider} request failed with status {status}"))
            }
            ProviderError::Request(e) if e.is_timeout() => {
                CoreError::Upstream(format!("{provider} request timed out"))
            }
            ProviderError::Request(_) => {
                CoreError::Upstream(format!("{provider} service is currently unavailable"))
            }
            ProviderError::EmptyReply => {
                CoreError::Upstream(format!("No text content in {provider} response"))
            }
        }
    }
}

/// Return the response unchanged on 2xx, otherwise an [`ProviderError::ApiError`]
/// carrying the status and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ProviderError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
