//! HTTP server initialization and runtime setup.
//!
//! Opens the database, applies migrations, wires the services, starts the
//! session sweeper and runs the Axum server until Ctrl+C.

use crate::application::services::SessionSettings;
use crate::config::Config;
use crate::infrastructure::persistence::pool;
use crate::routes::app_router;
use crate::state::{AppState, SqliteAccountService};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often expired sessions are deleted in the background.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Schema migrations
/// - Account, link and profile services
/// - Background sweeper for expired sessions
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = pool::connect(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_connect_timeout),
    )
    .await
    .context("Failed to open database")?;
    tracing::info!("Connected to database");

    pool::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let settings = SessionSettings {
        signing_secret: config.session_signing_secret.clone(),
        ttl: chrono::Duration::hours(config.session_ttl_hours),
        remember_ttl: chrono::Duration::days(config.remember_me_days),
    };

    let state = AppState::new(Arc::new(pool), settings, config.secure_cookies);

    tokio::spawn(run_session_sweeper(
        state.account_service.clone(),
        SESSION_SWEEP_INTERVAL,
    ));
    tracing::info!("Session sweeper started");

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Periodically deletes expired sessions. Failures are logged and retried on
/// the next tick.
async fn run_session_sweeper(accounts: Arc<SqliteAccountService>, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;
        if let Err(e) = accounts.purge_expired_sessions().await {
            tracing::warn!(error = %e, "Session sweep failed");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
