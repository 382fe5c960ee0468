//! Unauthenticated access to published forms by shareable token.

use axum::extract::{Path, State};
use axum::Json;
use formcraft_core::error::CoreError;
use formcraft_core::publishing::ensure_accepting_responses;
use formcraft_db::models::form::PublicForm;
use formcraft_db::repositories::FormRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/public/forms/{shareableUrl}
///
/// Unknown tokens are 404; a token whose form was unpublished is 403.
pub async fn get_by_share_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<PublicForm>>> {
    let form = FormRepo::find_by_shareable_url(&state.pool, &token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Form",
                id: token.clone(),
            })
        })?;

    ensure_accepting_responses(form.publish_status)?;

    Ok(Json(DataResponse { data: form.into() }))
}
