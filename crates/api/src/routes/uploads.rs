use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Upload route, merged at the `/api` level.
///
/// ```text
/// POST /upload  -> upload
/// ```
///
/// Bodies larger than the limit are rejected with 413 before the handler runs.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/upload",
        post(uploads::upload).layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        )),
    )
}
