use crate::config::ServerConfig;
use crate::registry::Registry;
use crate::signaling::{AppState, router};
use crate::sweeper::spawn_sweeper;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Runs the signaling server until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let registry = Registry::new();
    let sweeper = spawn_sweeper(
        registry.clone(),
        config.sweep_interval,
        config.room_timeout,
    );

    let state = AppState::new(registry, config.ice_servers.clone());
    let app = router(state, config.cors);

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Signaling server listening on http://{}", config.bind_address);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Signaling server failed");

    sweeper.abort();
    info!("Signaling server stopped");
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
