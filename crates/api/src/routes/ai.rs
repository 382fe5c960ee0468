use axum::routing::post;
use axum::Router;

use crate::handlers::suggestions;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /suggestions  -> suggest (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", post(suggestions::suggest))
}
