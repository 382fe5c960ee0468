use async_trait::async_trait;
use formcraft_core::error::CoreError;
use formcraft_core::suggestions::SuggestionProvider;

/// Stand-in used when the selected provider has no API key.
pub struct DisabledProvider {
    provider: &'static str,
    env_var: &'static str,
}

impl DisabledProvider {
    pub fn new(provider: &'static str, env_var: &'static str) -> Self {
        Self { provider, env_var }
    }
}

#[async_trait]
impl SuggestionProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, CoreError> {
        Err(CoreError::Upstream(format!(
            "{} API key is not configured (set {})",
            self.provider, self.env_var
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn every_call_fails_upstream() {
        let p = DisabledProvider::new("Groq", "GROQ_API_KEY");
        assert_matches!(
            p.complete("anything").await,
            Err(CoreError::Upstream(m)) if m.contains("not configured")
        );
    }
}
