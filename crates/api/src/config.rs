use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use formcraft_assist::{AssistConfig, ProviderKind};
use formcraft_core::uploads::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front-end origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Where uploads are written and served from (`/uploads/...`).
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub assist: AssistConfig,
}

impl ServerConfig {
    /// Read the environment, falling back to local-development defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `5000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `UPLOAD_DIR`              | `uploads`               |
    /// | `MAX_UPLOAD_BYTES`        | `104857600` (100 MiB)   |
    /// | `AI_PROVIDER`             | `groq`                  |
    /// | `GROQ_API_KEY`            | unset                   |
    /// | `CLAUDE_API_KEY`          | unset                   |
    /// | `AI_REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// `JWT_SECRET` and `JWT_EXPIRY_MINS` are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// When a numeric variable does not parse, or `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 5000),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:5173".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            upload_dir: env_or("UPLOAD_DIR", PathBuf::from("uploads")),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            assist: AssistConfig {
                provider: ProviderKind::parse(&env_or("AI_PROVIDER", "groq".to_string())),
                groq_api_key: std::env::var("GROQ_API_KEY").ok(),
                claude_api_key: std::env::var("CLAUDE_API_KEY").ok(),
                request_timeout: Duration::from_secs(env_or("AI_REQUEST_TIMEOUT_SECS", 30)),
            },
        }
    }
}

/// Parse `key` if set, otherwise use `default`.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            ["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn unset_variable_uses_default() {
        let port: u16 = env_or("FORMCRAFT_TEST_SURELY_UNSET_PORT", 5000);
        assert_eq!(port, 5000);
    }
}
