//! Handler for AI field suggestions.

use axum::extract::State;
use axum::Json;
use formcraft_core::suggestions::{suggest_fields, FieldSuggestion};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub purpose: String,
}

/// POST /api/ai/suggestions
pub async fn suggest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SuggestionsRequest>,
) -> AppResult<Json<DataResponse<Vec<FieldSuggestion>>>> {
    tracing::info!(
        user_id = auth_user.user_id,
        provider = state.suggestions.name(),
        "Generating field suggestions"
    );

    let seed = chrono::Utc::now().timestamp_millis();
    let suggestions = suggest_fields(state.suggestions.as_ref(), &input.purpose, seed).await?;

    Ok(Json(DataResponse { data: suggestions }))
}
