//! Form response entity model.

use formcraft_core::answer::ResponseData;
use formcraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A submitted response. Immutable once inserted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: DbId,
    pub form_id: DbId,
    pub response_data: Json<ResponseData>,
    pub submitted_at: Timestamp,
}
