//! `AuthUser` extractor: the form owner behind a bearer token.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use formcraft_core::error::CoreError;
use formcraft_core::types::DbId;

use crate::auth::jwt::{rejection_message, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Identity attached to private routes (form CRUD, responses, analytics, AI).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("No token provided".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CoreError::Unauthorized(
                "Expected an Authorization header of the form: Bearer <token>".into(),
            )
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|e| CoreError::Unauthorized(rejection_message(&e).into()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(v) = value {
            map.insert(AUTHORIZATION, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers(Some("Bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn missing_header() {
        assert_matches!(
            bearer_token(&headers(None)),
            Err(CoreError::Unauthorized(msg)) if msg == "No token provided"
        );
    }

    #[test]
    fn wrong_scheme_or_empty_token() {
        assert_matches!(bearer_token(&headers(Some("Basic xyz"))), Err(CoreError::Unauthorized(_)));
        assert_matches!(bearer_token(&headers(Some("Bearer "))), Err(CoreError::Unauthorized(_)));
    }
}
