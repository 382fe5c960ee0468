//! Route definitions for the `/forms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{form, form_response};
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/publish        -> publish_form
/// POST   /{id}/unpublish      -> unpublish_form
/// POST   /{id}/responses      -> submit (public)
/// GET    /{id}/responses      -> list responses
/// GET    /{id}/analytics      -> analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::list).post(form::create))
        .route(
            "/{id}",
            get(form::get_by_id).put(form::update).delete(form::delete),
        )
        .route("/{id}/publish", post(form::publish_form))
        .route("/{id}/unpublish", post(form::unpublish_form))
        .route(
            "/{id}/responses",
            get(form_response::list).post(form_response::submit),
        )
        .route("/{id}/analytics", get(form_response::analytics))
}
