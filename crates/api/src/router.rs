//! Application router, shared by `main.rs` and the integration tests so both
//! run behind the same middleware.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;
use crate::storage::UPLOADS_URL_PREFIX;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mount `/health`, `/api/*` and the uploaded-file directory, wrapped in
/// (outermost first) CORS, request ids, tracing, a timeout and panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Layers are applied one at a time (innermost first) rather than via a
    // single `ServiceBuilder`, so each response body is converted back to an
    // axum `Body` between layers; `CorsLayer` requires a `Default` body.
    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes(config.max_upload_bytes))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.upload_dir))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the configured front-end origins.
///
/// Panics at startup on an origin that is not a valid header value.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = config.cors_origins.iter().map(|origin| {
        origin
            .parse()
            .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}
