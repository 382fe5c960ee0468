//! Repository for the `form_responses` table.

use formcraft_core::answer::ResponseData;
use formcraft_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::form_response::FormResponse;

const COLUMNS: &str = "id, form_id, response_data, submitted_at";

/// Insert and read operations for responses. There is no update path.
pub struct FormResponseRepo;

impl FormResponseRepo {
    /// Insert a response, returning the created row.
    pub async fn create(
        pool: &PgPool,
        form_id: DbId,
        data: &ResponseData,
    ) -> Result<FormResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_responses (form_id, response_data)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormResponse>(&query)
            .bind(form_id)
            .bind(Json(data))
            .fetch_one(pool)
            .await
    }

    /// List a form's responses, newest first.
    pub async fn list_by_form(
        pool: &PgPool,
        form_id: DbId,
    ) -> Result<Vec<FormResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_responses
             WHERE form_id = $1
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, FormResponse>(&query)
            .bind(form_id)
            .fetch_all(pool)
            .await
    }

    /// Load only the answer payloads of a form, in submission order.
    pub async fn list_payloads_by_form(
        pool: &PgPool,
        form_id: DbId,
    ) -> Result<Vec<ResponseData>, sqlx::Error> {
        let rows: Vec<(Json<ResponseData>,)> = sqlx::query_as(
            "SELECT response_data FROM form_responses
             WHERE form_id = $1
             ORDER BY submitted_at ASC, id ASC",
        )
        .bind(form_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(data,)| data.0).collect())
    }
}
