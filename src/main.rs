//! Countdown - A countdown timer engine driven over HTTP
//!
//! This is the main entry point for the countdown application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::{info, warn};

use countdown::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{finish_hook_task, TokioTickScheduler},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let scheduler = TokioTickScheduler::from_current().map_err(|e| anyhow!(e))?;
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        Arc::new(scheduler),
    ));

    if config.has_preset() {
        let view = state.preset(config.hours, config.minutes, config.seconds)?;
        info!("Preset fields to {}:{}:{}", view.hours, view.minutes, view.seconds);
    }

    // Start the finish hook before anything can finish
    let hook_state = Arc::clone(&state);
    let on_finish = config.on_finish.clone();
    tokio::spawn(async move {
        finish_hook_task(hook_state, on_finish).await;
    });

    if config.autostart {
        if !state.play()?.applied {
            warn!("Autostart ignored");
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /play                 - Start or resume the countdown");
    info!("  POST /pause                - Pause the countdown");
    info!("  POST /stop                 - Stop and reset the countdown");
    info!("  POST /fields/:field/focus  - Clear a field for editing");
    info!("  PUT  /fields/:field        - Change a field ({{\"raw\": \"...\"}})");
    info!("  POST /edit-done            - Finish editing fields");
    info!("  GET  /status               - Current countdown view");
    info!("  GET  /events               - Server-sent view updates");
    info!("  GET  /health               - Health check");

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

    if let Err(e) = state.shutdown() {
        warn!("Failed to cancel ticking on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
