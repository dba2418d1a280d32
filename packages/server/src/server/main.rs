// Main entry point for the demo API server

use std::sync::Arc;

use access_gate::{server::auth::SignedCookieStore, server::build_app, Config};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,access_gate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting access gate demo server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(session_name = %config.session_name, "Configuration loaded");

    let store = Arc::new(SignedCookieStore::new(
        &config.session_secret,
        config.session_issuer.clone(),
        config.session_ttl,
    ));

    // Build application
    let app = build_app(&config, store).context("Failed to register routes")?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
