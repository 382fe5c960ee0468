//! Handlers for `/forms/{id}/responses` and `/forms/{id}/analytics`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use formcraft_core::analytics::{aggregate, FormAnalytics};
use formcraft_core::answer::ResponseData;
use formcraft_core::error::CoreError;
use formcraft_core::publishing::ensure_accepting_responses;
use formcraft_core::submission::{check_duplicate, retain_known_fields, validate_submission};
use formcraft_core::types::DbId;
use formcraft_db::models::form_response::FormResponse;
use formcraft_db::repositories::{FormRepo, FormResponseRepo};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::form::load_owned_form;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pull `responseData` out of a submission body.
///
/// The body is taken as raw JSON so that a missing or non-object payload is
/// reported as a 400 with a specific message.
fn parse_response_data(body: Value) -> AppResult<ResponseData> {
    let Some(raw) = body.get("responseData").filter(|v| v.is_object()) else {
        return Err(AppError::BadRequest(
            "Response data is required and must be an object".into(),
        ));
    };
    serde_json::from_value(raw.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid response data: {e}")))
}

/// POST /api/forms/{id}/responses
///
/// Public submission. Runs the publish gate and the required-field check,
/// drops keys that match no field, then applies duplicate suppression
/// before inserting.
pub async fn submit(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<DataResponse<FormResponse>>)> {
    let data = parse_response_data(body)?;

    let form = FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", form_id)))?;

    ensure_accepting_responses(form.publish_status)?;
    validate_submission(&form.fields, &data).map_err(CoreError::from)?;
    let data = retain_known_fields(&form.fields, data);

    // Best effort: the scan and the insert are separate statements, so two
    // concurrent submissions with the same email can both be accepted.
    if form.prevent_duplicates {
        let existing = FormResponseRepo::list_payloads_by_form(&state.pool, form_id).await?;
        check_duplicate(&form.fields, &data, &existing)?;
    }

    let response = FormResponseRepo::create(&state.pool, form_id, &data).await?;
    tracing::info!(form_id, response_id = response.id, "Response submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/forms/{id}/responses
///
/// Newest first. Owner only.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(form_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FormResponse>>>> {
    load_owned_form(&state, form_id, &auth_user, "view responses of").await?;
    let responses = FormResponseRepo::list_by_form(&state.pool, form_id).await?;
    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/forms/{id}/analytics
///
/// Recomputed from every response on each call. Owner only.
pub async fn analytics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(form_id): Path<DbId>,
) -> AppResult<Json<DataResponse<FormAnalytics>>> {
    let form = load_owned_form(&state, form_id, &auth_user, "view analytics of").await?;
    let payloads = FormResponseRepo::list_payloads_by_form(&state.pool, form_id).await?;

    let summary = aggregate(form.id, &form.title, &form.fields, &payloads);
    tracing::debug!(form_id, responses = summary.response_count, "Computed analytics");

    Ok(Json(DataResponse { data: summary }))
}
