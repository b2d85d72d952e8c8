//! Countdown Timer - a countdown with start/pause/reset controls
//!
//! This is the main entry point for the countdown-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_period()));

    if config.duration.is_some() {
        let outcome = state.set_duration(config.duration)?;
        if !outcome.applied {
            tracing::warn!("Ignoring initial duration of 0s");
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /          - Control page");
    info!("  POST /duration  - Set duration ({{\"value\": seconds}})");
    info!("  POST /start     - Start or resume the countdown");
    info!("  POST /pause     - Pause the countdown");
    info!("  POST /reset     - Reset to the last duration");
    info!("  GET  /status    - Current timer and server status");
    info!("  GET  /events    - Timer updates as server-sent events");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
