mod config;
mod errors;
mod extraction;
mod models;
mod prediction;
mod routes;
mod state;
mod trends;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::triggers::default_triggers;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Buffscope API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the trigger phrases once, before the first request
    let triggers = default_triggers();
    info!("Trigger set compiled ({} phrases)", triggers.len());

    let state = AppState::new(config.clone());
    info!(
        "Extraction pipeline ready (unit scale: {}, date format: {:?})",
        state.extractor.scale(),
        config.release_date_format
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
