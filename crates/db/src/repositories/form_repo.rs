//! Repository for the `forms` table.

use formcraft_core::publishing::PublishState;
use formcraft_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::form::{CreateForm, Form, FormSummary, UpdateForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, purpose, fields, publish_status, \
                       shareable_url, prevent_duplicates, created_at, updated_at";

/// Provides CRUD and publish-state operations for forms.
pub struct FormRepo;

impl FormRepo {
    /// Insert a new draft form, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateForm) -> Result<Form, sqlx::Error> {
        let query = format!(
            "INSERT INTO forms (user_id, title, description, purpose, fields, prevent_duplicates)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.purpose)
            .bind(Json(&input.fields))
            .bind(input.prevent_duplicates)
            .fetch_one(pool)
            .await
    }

    /// Find a form by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1");
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a form by its shareable token, regardless of publish status.
    pub async fn find_by_shareable_url(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE shareable_url = $1");
        sqlx::query_as::<_, Form>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List a user's forms with response counts, most recently created first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FormSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                    (SELECT COUNT(*) FROM form_responses r WHERE r.form_id = forms.id)
                        AS response_count
             FROM forms
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FormSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a form's editable attributes (last write wins).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateForm,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!(
            "UPDATE forms SET
                title = $2,
                description = $3,
                purpose = $4,
                fields = $5,
                prevent_duplicates = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.purpose)
            .bind(Json(&input.fields))
            .bind(input.prevent_duplicates)
            .fetch_optional(pool)
            .await
    }

    /// Persist a publish-state transition.
    ///
    /// Returns `None` if no row with the given `id` exists. A token collision
    /// violates `uq_forms_shareable_url`.
    pub async fn set_publish_state(
        pool: &PgPool,
        id: DbId,
        state: &PublishState,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!(
            "UPDATE forms SET publish_status = $2, shareable_url = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(state.status.as_str())
            .bind(&state.shareable_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a form; its responses go with it via `ON DELETE CASCADE`.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
