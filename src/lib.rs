//! # Veterinary clinic API
//!
//! CRUD backend for a veterinary clinic: people, users, pets, veterinarians,
//! appointments, clinical histories, treatments and treatment follow-ups.
//!
//! People, users, pets and veterinarians receive identifiers from
//! [`storage::allocate_next_id`]: each insert takes its table's exclusive
//! transaction-scoped lock, reads `MAX(id)` and inserts `MAX(id) + 1` before
//! committing. The remaining tables use database-generated identifiers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  API (axum) → RecordService → Storage (memory | PostgreSQL)       │
//! │                                   └─ allocate_next_id per table   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

use std::net::SocketAddr;

use anyhow::Context;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::storage::create_storage;

const ALLOCATION_BUCKETS: &[f64] = &[0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0];

/// Run the clinic API service.
///
/// This function:
/// 1. Reads `.env` and loads configuration from files and environment
/// 2. Initializes logging and the Prometheus recorder
/// 3. Initializes the storage backend
/// 4. Starts the HTTP server and waits for a shutdown signal
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - Storage backend fails to initialize
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.storage.backend,
        "Starting veterinary clinic API"
    );

    let metrics = if config.observability.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let storage = create_storage(&config.storage)
        .await
        .context("failed to initialize storage")?;
    info!(backend = storage.backend_name(), "Storage initialized");

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = AppState::new(storage, metrics);
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.json_logs() {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Install the global Prometheus recorder.
fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("vetclinic_id_allocation_seconds".to_string()),
            ALLOCATION_BUCKETS,
        )?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
