//! Form entity model and DTOs.

use formcraft_core::form::{FormField, PublishStatus};
use formcraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A form row from the `forms` table.
///
/// `fields` is stored as a JSONB array and always replaced as a whole.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub fields: Json<Vec<FormField>>,
    #[sqlx(try_from = "String")]
    pub publish_status: PublishStatus,
    /// Assigned on first publish and kept across unpublish.
    pub shareable_url: Option<String>,
    pub prevent_duplicates: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A form row plus its response count, for the owner's form list.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub form: Form,
    pub response_count: i64,
}

/// Public projection of a published form. Omits ownership and timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicForm {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub shareable_url: Option<String>,
}

impl From<Form> for PublicForm {
    fn from(form: Form) -> Self {
        Self {
            id: form.id,
            title: form.title,
            description: form.description,
            fields: form.fields.0,
            shareable_url: form.shareable_url,
        }
    }
}

/// DTO for inserting a new form. Values must already be validated and
/// normalized; new forms always start as drafts.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub fields: Vec<FormField>,
    pub prevent_duplicates: bool,
}

/// DTO for a full-replace update of a form's editable attributes.
#[derive(Debug, Clone)]
pub struct UpdateForm {
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub fields: Vec<FormField>,
    pub prevent_duplicates: bool,
}
