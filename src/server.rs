//! HTTP server initialization and runtime setup.
//!
//! Handles the store connection, click worker spawning, and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{RedisStore, UnconfiguredStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects the key-value store described by `config`.
///
/// Never fails: a missing, malformed or unreachable Redis yields an
/// [`UnconfiguredStore`] so the server still starts and answers store-backed
/// requests with a configuration error.
pub async fn build_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::warn!("REDIS_URL is not set, store operations will fail");
        return Arc::new(UnconfiguredStore::new("REDIS_URL is not set"));
    };

    match RedisStore::connect(redis_url, config.store_timeout).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Redis unavailable: {}. Store operations will fail.", e);
            Arc::new(UnconfiguredStore::new(e.to_string()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis store (or [`UnconfiguredStore`] fallback)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let state = AppState::new(store, click_tx, &config.services);

    let worker = tokio::spawn(run_click_worker(click_rx, state.click_service.clone()));
    tracing::info!("Click worker started");

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Every sender went away with the router; the worker drains what is left.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Click worker panicked: {}", e),
        Err(_) => tracing::warn!("Click worker did not finish within {:?}", WORKER_DRAIN_TIMEOUT),
    }

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
