// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirpy Service
//!
//! Serves the static site under `/app`, the chirp and user API under
//! `/api`, and the operator pages under `/admin`.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables, optionally seeded
//! from a `.env` file:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `DATABASE_URL`: SQLite URL (default: sqlite://chirpy.db)
//! - `FILESERVER_ROOT`: Directory served under `/app` (default: static)
//! - `MAX_CHIRP_LENGTH`: Chirp length limit in characters, at most 140 (default: 140)
//! - `BANNED_WORDS`: Comma-separated masked words
//! - `METRICS_ENABLED`: Expose Prometheus metrics (default: true)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chirpy::{config::Config, db::Database, handlers::AppState, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        database_url = %config.database.url,
        assets_root = %config.assets.root.display(),
        max_chirp_length = config.validation.max_chirp_length,
        banned_words = config.validation.banned_words.len(),
        "Starting Chirpy"
    );

    let db = Database::connect(&config.database.url).await?;
    info!("Connected to SQLite");

    let state = Arc::new(AppState::new(config.clone(), db.clone())?);
    let app = server::router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
