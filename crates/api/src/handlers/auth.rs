//! Handlers for the `/auth` resource (register, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use formcraft_core::error::CoreError;
use formcraft_db::models::user::{CreateUser, UserResponse};
use formcraft_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, normalize_email, validate_password_strength, verify_password,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Shared message for unknown email and wrong password alike.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and return a token for it.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    let input = RegisterRequest {
        email: normalize_email(&input.email),
        name: input.name.trim().to_string(),
        password: input.password,
    };
    input.validate().map_err(|e| AppError::Core(validation_error(&e)))?;
    validate_password_strength(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration still trips `uq_users_email` (409).
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            name: input.name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = auth_response(&state, user.into())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let response = auth_response(&state, user.into())?;
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: UserResponse) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user,
    })
}

/// Flatten `validator` errors into one message, field messages joined by "; ".
fn validation_error(errors: &validator::ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .collect();
    messages.sort();
    CoreError::Validation(messages.join("; "))
}
