use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::student::repository::SeaOrmStudentRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl_c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Connect the store, apply migrations when enabled and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<(Router, sea_orm::DatabaseConnection)> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrated", "database schema up to date");
    }

    let state = ServerState::new(Arc::new(SeaOrmStudentRepository::new(db.clone())));
    Ok((routes::build_router(state, build_cors()), db))
}

/// Public entry: build the app and run the HTTP server until a shutdown signal
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let (app, db) = build_app(&cfg).await?;

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting student registry server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!(event = "db_closed", "database pool closed");
    Ok(())
}
