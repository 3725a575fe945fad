//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connection and migrations, the
//! retention sweeper, and the Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::RecordStore;
use crate::domain::retention_sweeper::RetentionSweeper;
use crate::infrastructure::persistence::{MemoryRecordStore, PgRecordStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::display_addr::display_base_url;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on the database.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Record store (PostgreSQL with migrations, or in-memory)
/// - Retention sweeper, which sweeps once immediately
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (store, pool): (Arc<dyn RecordStore>, Option<PgPool>) = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_database(&config).await?;
            (
                Arc::new(PgRecordStore::new(Arc::new(pool.clone()))),
                Some(pool),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on restart");
            (Arc::new(MemoryRecordStore::new()), None)
        }
    };

    let base_url = config
        .public_base_url
        .clone()
        .unwrap_or_else(|| display_base_url(config.listen_port()));

    let sweeper = RetentionSweeper::new(store.clone(), config.sweep_interval()).spawn();
    tracing::info!("Retention sweeper started");

    let state = AppState::new(store, base_url.clone(), sweeper.status());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");
    log_endpoints(&base_url);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("HTTP server stopped, shutting down background tasks");
    sweeper.shutdown().await;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    Ok(())
}

/// Opens the PostgreSQL pool with exponential backoff, then applies
/// pending migrations.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    let pool = Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

fn log_endpoints(base_url: &str) {
    tracing::info!("Endpoints:");
    tracing::info!("  GET {base_url}/api/short?url=https://example.com&slug=my-link");
    tracing::info!("  GET {base_url}/api/chk?url={base_url}/my-link");
    tracing::info!("  GET {base_url}/api/del?url={base_url}/my-link");
    tracing::info!("  GET {base_url}/<code>");
    tracing::info!("  GET {base_url}/health");
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
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
