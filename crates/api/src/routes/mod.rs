pub mod ai;
pub mod auth;
pub mod forms;
pub mod health;
pub mod public;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/me                                current user (requires auth)
///
/// /forms                                  list, create (requires auth)
/// /forms/{id}                             get, update, delete (owner)
/// /forms/{id}/publish                     publish (owner)
/// /forms/{id}/unpublish                   unpublish (owner)
/// /forms/{id}/responses                   submit (public), list (owner)
/// /forms/{id}/analytics                   analytics (owner)
///
/// /public/forms/{shareableUrl}            published form by token (public)
///
/// /ai/suggestions                         AI field suggestions (requires auth)
///
/// /upload                                 multipart upload (public)
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/forms", forms::router())
        .nest("/public", public::router())
        .nest("/ai", ai::router())
        .merge(uploads::router(max_upload_bytes))
}
