use std::net::SocketAddr;
use std::sync::Arc;

use formcraft_api::config::ServerConfig;
use formcraft_api::router::build_app_router;
use formcraft_api::state::AppState;
use formcraft_api::storage::LocalFileStore;
use formcraft_db::DbPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "formcraft_api=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        "Configuration loaded"
    );

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = prepare_database(&database_url).await;

    let state = build_state(pool, config.clone());
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", config.host)),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot listen on {addr}: {e}"));
    tracing::info!(%addr, "FormCraft API listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server stopped with an error");
        std::process::exit(1);
    }
    tracing::info!("Shut down cleanly");
}

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` emits JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        }
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Connect, confirm the database answers, and bring the schema up to date.
async fn prepare_database(database_url: &str) -> DbPool {
    let pool = formcraft_db::create_pool(database_url)
        .await
        .unwrap_or_else(|e| panic!("Cannot connect to the database: {e}"));

    formcraft_db::health_check(&pool)
        .await
        .unwrap_or_else(|e| panic!("Database is not answering queries: {e}"));

    formcraft_db::run_migrations(&pool)
        .await
        .unwrap_or_else(|e| panic!("Migrations failed: {e}"));
    tracing::info!("Database ready");

    pool
}

/// Pick the suggestion provider and file store once, for the whole process.
fn build_state(pool: DbPool, config: ServerConfig) -> AppState {
    let suggestions = formcraft_assist::provider_from_config(&config.assist);
    tracing::info!(provider = suggestions.name(), "AI suggestions enabled");

    let files = Arc::new(LocalFileStore::new(config.upload_dir.clone()));

    AppState {
        pool,
        config: Arc::new(config),
        suggestions,
        files,
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("Interrupt received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
