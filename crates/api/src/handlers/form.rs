//! Handlers for the `/forms` resource (owner CRUD and publishing).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use formcraft_core::error::CoreError;
use formcraft_core::form::{
    normalize_fields, trim_optional, validate_form_definition, FormDraft, FormField,
};
use formcraft_core::publishing::{ensure_owner, publish, unpublish};
use formcraft_core::types::DbId;
use formcraft_db::models::form::{CreateForm, Form, FormSummary, UpdateForm};
use formcraft_db::repositories::FormRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for create and update. Update replaces every attribute,
/// including the whole field list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub prevent_duplicates: bool,
}

/// Trimmed, renumbered, and validated form attributes.
#[derive(Debug)]
struct PreparedForm {
    title: String,
    description: Option<String>,
    purpose: Option<String>,
    fields: Vec<FormField>,
    prevent_duplicates: bool,
}

fn prepare(input: FormInput) -> Result<PreparedForm, CoreError> {
    let prepared = PreparedForm {
        title: input.title.trim().to_string(),
        description: trim_optional(input.description),
        purpose: trim_optional(input.purpose),
        fields: normalize_fields(input.fields),
        prevent_duplicates: input.prevent_duplicates,
    };

    validate_form_definition(&FormDraft {
        title: &prepared.title,
        description: prepared.description.as_deref(),
        purpose: prepared.purpose.as_deref(),
        fields: &prepared.fields,
    })?;

    Ok(prepared)
}

/// Load a form and check that `user` owns it.
///
/// A missing form is 404 and someone else's form is 403.
pub(crate) async fn load_owned_form(
    state: &AppState,
    id: DbId,
    user: &AuthUser,
    action: &str,
) -> AppResult<Form> {
    let form = FormRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;
    ensure_owner(form.user_id, user.user_id, action)?;
    Ok(form)
}

/// POST /api/forms
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<FormInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Form>>)> {
    let prepared = prepare(input)?;

    let form = FormRepo::create(
        &state.pool,
        &CreateForm {
            user_id: auth_user.user_id,
            title: prepared.title,
            description: prepared.description,
            purpose: prepared.purpose,
            fields: prepared.fields,
            prevent_duplicates: prepared.prevent_duplicates,
        },
    )
    .await?;

    tracing::info!(form_id = form.id, user_id = auth_user.user_id, "Form created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: form })))
}

/// GET /api/forms
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FormSummary>>>> {
    let forms = FormRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: forms }))
}

/// GET /api/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Form>>> {
    let form = load_owned_form(&state, id, &auth_user, "access").await?;
    Ok(Json(DataResponse { data: form }))
}

/// PUT /api/forms/{id}
///
/// Last write wins; there is no concurrency token.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<FormInput>,
) -> AppResult<Json<DataResponse<Form>>> {
    load_owned_form(&state, id, &auth_user, "update").await?;
    let prepared = prepare(input)?;

    let form = FormRepo::update(
        &state.pool,
        id,
        &UpdateForm {
            title: prepared.title,
            description: prepared.description,
            purpose: prepared.purpose,
            fields: prepared.fields,
            prevent_duplicates: prepared.prevent_duplicates,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;

    Ok(Json(DataResponse { data: form }))
}

/// DELETE /api/forms/{id}
///
/// Responses are removed with the form.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned_form(&state, id, &auth_user, "delete").await?;

    if FormRepo::delete(&state.pool, id).await? {
        tracing::info!(form_id = id, user_id = auth_user.user_id, "Form deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Form", id)))
    }
}

/// POST /api/forms/{id}/publish
///
/// Mints a shareable token on first publish; later publishes reuse it.
pub async fn publish_form(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Form>>> {
    let form = load_owned_form(&state, id, &auth_user, "publish").await?;

    let next = publish(form.shareable_url);
    let form = FormRepo::set_publish_state(&state.pool, id, &next)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;

    tracing::info!(form_id = id, "Form published");
    Ok(Json(DataResponse { data: form }))
}

/// POST /api/forms/{id}/unpublish
///
/// Returns the form to draft. The shareable token is kept.
pub async fn unpublish_form(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Form>>> {
    let form = load_owned_form(&state, id, &auth_user, "unpublish").await?;

    let next = unpublish(form.shareable_url);
    let form = FormRepo::set_publish_state(&state.pool, id, &next)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;

    tracing::info!(form_id = id, "Form unpublished");
    Ok(Json(DataResponse { data: form }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use formcraft_core::form::FieldKind;

    use super::*;

    fn field(id: &str, label: &str, order: i32) -> FormField {
        FormField {
            id: id.into(),
            label: label.into(),
            placeholder: Some("  ".into()),
            required: false,
            order,
            kind: FieldKind::Text,
        }
    }

    #[test]
    fn prepare_trims_and_renumbers() {
        let prepared = prepare(FormInput {
            title: "  Survey ".into(),
            description: Some("   ".into()),
            purpose: None,
            fields: vec![field("b", " Second ", 9), field("a", "First", 3)],
            prevent_duplicates: true,
        })
        .unwrap();

        assert_eq!(prepared.title, "Survey");
        assert_eq!(prepared.description, None);
        assert_eq!(prepared.fields[0].label, "Second");
        assert_eq!(prepared.fields[0].order, 0);
        assert_eq!(prepared.fields[1].order, 1);
        assert_eq!(prepared.fields[0].placeholder, None);
        assert!(prepared.prevent_duplicates);
    }

    #[test]
    fn prepare_rejects_blank_title() {
        let result = prepare(FormInput {
            title: "   ".into(),
            description: None,
            purpose: None,
            fields: vec![],
            prevent_duplicates: false,
        });
        assert_matches!(
            result,
            Err(CoreError::Validation(msg)) if msg.contains("Title is required")
        );
    }

    #[test]
    fn input_accepts_camel_case_wire_shape() {
        let input: FormInput = serde_json::from_value(serde_json::json!({
            "title": "Order",
            "preventDuplicates": true,
            "fields": [
                {
                    "id": "f1", "type": "select", "label": "Size",
                    "options": ["S", "M"], "required": true, "order": 0
                }
            ]
        }))
        .unwrap();
        assert!(input.prevent_duplicates);
        assert_eq!(input.fields[0].kind.options().len(), 2);
    }
}
