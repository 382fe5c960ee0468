use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// Name of the configured AI provider.
    pub ai_provider: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<DataResponse<HealthResponse>> {
    let db_healthy = formcraft_db::health_check(&state.pool).await.is_ok();

    Json(DataResponse {
        data: HealthResponse {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            ai_provider: state.suggestions.name(),
        },
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
