//! HTTP API server for the gourmet place directory.
//!
//! This server:
//! - Persists the place collection in one JSON file (`PLACES_PATH`)
//! - Serializes every mutating operation behind the store's write mutex
//! - Exposes listing, menu lookup, creation, menu replacement, deletion,
//!   and a random pick over plain HTTP

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;

use config::Config;
use gourmet_store_local::JsonFileStore;
use handlers::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    info!("Starting gourmet-api v{}", env!("CARGO_PKG_VERSION"));
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);
    info!("  Places file: {}", config.places_path.display());

    let state = AppState {
        store: Arc::new(JsonFileStore::new(&config.places_path)),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app: Router = router(state).layer(cors).layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, initiating shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        info!("Received SIGTERM, initiating shutdown");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
