//! Handler error type and its JSON rendering: `{ "error": <message>, "code": <CODE> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formcraft_core::error::CoreError;
use serde::Serialize;

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached domain validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Postgres SQLSTATE for a unique violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Status, machine code and client-facing message for one error.
struct Classified {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Classified {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 500 with the detail kept out of the response body.
    fn internal(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with an internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Classified {
            status,
            code,
            message,
        } = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => {
                Classified::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.as_str())
            }
            AppError::InternalError(msg) => Classified::internal(msg),
        };

        (status, Json(ErrorBody { error: message, code })).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    use StatusCode as S;

    match err {
        CoreError::NotFound { entity, id } => Classified::new(
            S::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Classified::new(S::BAD_REQUEST, "VALIDATION_ERROR", msg.as_str())
        }
        CoreError::Conflict(msg) => Classified::new(S::CONFLICT, "CONFLICT", msg.as_str()),
        CoreError::Unauthorized(msg) => {
            Classified::new(S::UNAUTHORIZED, "UNAUTHORIZED", msg.as_str())
        }
        CoreError::Forbidden(msg) => Classified::new(S::FORBIDDEN, "FORBIDDEN", msg.as_str()),
        // Same status as Forbidden; the code lets the public page say "closed".
        CoreError::SubmissionClosed(msg) => {
            Classified::new(S::FORBIDDEN, "SUBMISSION_CLOSED", msg.as_str())
        }
        CoreError::RateLimited(msg) => {
            Classified::new(S::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.as_str())
        }
        CoreError::Upstream(msg) => {
            tracing::warn!(error = %msg, "Upstream collaborator failed");
            Classified::new(S::BAD_GATEWAY, "UPSTREAM_ERROR", msg.as_str())
        }
        CoreError::Internal(msg) => Classified::internal(msg),
    }
}

/// `RowNotFound` is a 404 and a unique violation on a `uq_*` constraint is a
/// 409. Anything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    if let sqlx::Error::RowNotFound = err {
        return Classified::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found");
    }

    let unique_constraint = err
        .as_database_error()
        .filter(|db| db.code().as_deref() == Some(UNIQUE_VIOLATION))
        .and_then(|db| db.constraint())
        .filter(|name| name.starts_with("uq_"));

    match unique_constraint {
        Some(constraint) => {
            Classified::new(StatusCode::CONFLICT, "CONFLICT", conflict_message(constraint))
        }
        None => Classified::internal(err),
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "User with this email already exists".to_string(),
        "uq_forms_shareable_url" => "Shareable link collision, please publish again".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
