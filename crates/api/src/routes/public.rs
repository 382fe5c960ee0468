use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET /forms/{shareable_url}  -> get_by_share_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/forms/{shareable_url}", get(public::get_by_share_token))
}
