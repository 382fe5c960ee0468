use std::sync::Arc;

use formcraft_core::suggestions::SuggestionProvider;
use formcraft_core::uploads::FileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: formcraft_db::DbPool,
    /// Server configuration (JWT settings, upload limits).
    pub config: Arc<ServerConfig>,
    /// AI provider chosen at startup.
    pub suggestions: Arc<dyn SuggestionProvider>,
    /// Backend for uploaded files.
    pub files: Arc<dyn FileStore>,
}
