mod config;
mod dto;
mod handlers;
mod interceptors;
mod middleware;
mod models;
mod routes;
mod services;
mod store;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use crate::config::{database::run_migrations, AppConfig, AppState, DatabaseConfig, StoreKind};
use crate::middleware::{setup_logging, LoggingConfig};
use crate::routes::create_router;
use crate::store::{MemoryUserStore, PgUserStore, UserStore};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    let logging_config = LoggingConfig::from_env().context("invalid logging configuration")?;
    let _log_guard = setup_logging(&logging_config);

    tracing::info!("Starting application...");

    // Load configurations
    let app_config = AppConfig::from_env().context("invalid application configuration")?;
    let db_config = DatabaseConfig::from_env().context("invalid storage configuration")?;

    tracing::info!("Loaded configuration for environment: {}", app_config.environment);

    let store = connect_store(&db_config).await?;
    tracing::info!(backend = store.backend(), "user store ready");

    let app_state = AppState::new(store, app_config.clone());

    // Create router
    let app = create_router(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr = app_config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "{} v{} is running on {}",
        app_config.app_name,
        app_config.app_version,
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_store(db_config: &DatabaseConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match db_config.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory user store; records are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        StoreKind::Postgres => {
            let pool = db_config
                .create_pool()
                .await
                .context("failed to connect to PostgreSQL")?;
            tracing::info!("Database connection pool created");

            run_migrations(&pool).await.context("failed to run migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgUserStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
