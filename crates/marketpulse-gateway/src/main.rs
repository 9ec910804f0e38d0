//! marketpulse gateway
//!
//! - JSON API: /api/agents, /api/search, /api/metrics, /api/dashboard
//! - Ops: /, /health, /readyz, /metrics
//! - Snapshot publisher ticking the live counters in the background
//!
//! Usage: `marketpulse-gateway [config.yaml]`. `PORT` overrides the listen port.

use tracing_subscriber::{fmt, EnvFilter};

use marketpulse_core::error::{MarketError, Result};
use marketpulse_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1);
    let mut cfg = config::load_or_default(path.as_deref())?;
    config::apply_port_override(&mut cfg, std::env::var("PORT").ok().as_deref())?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg)?;
    if state.cfg().publisher.autostart {
        state.start_publisher()?;
    }
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "marketpulse-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MarketError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await
        .map_err(|e| MarketError::Internal(format!("server failed: {e}")))?;

    state.publisher().stop().await;
    tracing::info!("marketpulse-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // no signal source: run until killed
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    state.metrics().set_draining();
    tracing::info!("shutdown requested, draining");
}
