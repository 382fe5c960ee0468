//! Bearer tokens for the form builder's owners.
//!
//! HS256 only, no refresh: a client whose token lapses logs in again.

use formcraft_core::types::DbId;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seven days, in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 10_080;

/// Payload carried by every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Owner's user id.
    pub sub: DbId,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id`, valid for `lifetime_secs` from `now`.
    fn issue(user_id: DbId, email: &str, now: i64, lifetime_secs: i64) -> Self {
        Self {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + lifetime_secs,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing settings shared by login, registration and the auth extractor.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_EXPIRY_MINS` (default 10080).
    ///
    /// # Panics
    ///
    /// On a missing or blank secret, or a non-numeric expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let expiry_mins = match std::env::var("JWT_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_EXPIRY_MINS,
        };

        Self {
            secret,
            expiry_mins,
        }
    }

    /// Lifetime reported to clients as `expiresIn`.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_mins * 60
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// Sign a fresh token for a user.
pub fn generate_token(user_id: DbId, email: &str, config: &JwtConfig) -> Result<String, JwtError> {
    let claims = Claims::issue(
        user_id,
        email,
        chrono::Utc::now().timestamp(),
        config.expires_in_secs(),
    );
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())
}

/// Check signature and expiry and return the claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<Claims>(token, &config.decoding_key(), &validation)
        .map(|data| data.claims)
}

/// Client-facing reason for a rejected token.
pub fn rejection_message(err: &JwtError) -> &'static str {
    match err.kind() {
        ErrorKind::ExpiredSignature => "Token has expired",
        _ => "Invalid token",
    }
}
