use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use dash_core::{
    CoreConfig, DEFAULT_HOST, DEFAULT_PORT, Gateway,
    config::{broadcast_capacity_from_env_value, flag_from_env_value},
};

/// Main entry point for the dashboard server
///
/// Serves the REST API, the `/ws` push channel and the Swagger UI from one listener.
///
/// # Environment Variables
/// - `DASHBOARD_ADDR`: Server address (default: "0.0.0.0:<PORT>")
/// - `PORT`: Port used when `DASHBOARD_ADDR` is unset (default: 4000)
/// - `DASHBOARD_BROADCAST_CAPACITY`: Push messages buffered per subscriber (default: 64)
/// - `DASHBOARD_SEED_FIXTURES`: Start with the fixture doctors and visit stats (default: true)
/// - `DASHBOARD_CORS_ANY_ORIGIN`: Allow any browser origin instead of localhost only (default: false)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - an environment variable holds an invalid value,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dash=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = bind_addr(
        std::env::var("DASHBOARD_ADDR").ok(),
        std::env::var("PORT").ok(),
    )?;

    let cfg = CoreConfig::new(
        broadcast_capacity_from_env_value(std::env::var("DASHBOARD_BROADCAST_CAPACITY").ok())?,
        flag_from_env_value(std::env::var("DASHBOARD_SEED_FIXTURES").ok(), true)?,
    )?;
    let cors_any_origin =
        flag_from_env_value(std::env::var("DASHBOARD_CORS_ANY_ORIGIN").ok(), false)?;

    let gateway = Arc::new(Gateway::from_config(&cfg));
    tracing::info!(
        "++ Loaded {} doctor(s) and {} visit stat(s)",
        gateway.list_doctors().len(),
        gateway.list_visit_stats().len()
    );

    let app = router(AppState::new(gateway), cors_any_origin);

    tracing::info!("++ Starting dashboard server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Dashboard server stopped");
    Ok(())
}

/// Resolves the listen address from `DASHBOARD_ADDR`, falling back to `PORT` on all interfaces.
fn bind_addr(addr: Option<String>, port: Option<String>) -> anyhow::Result<String> {
    if let Some(addr) = addr.filter(|a| !a.trim().is_empty()) {
        return Ok(addr.trim().to_string());
    }

    let port = match port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        None => DEFAULT_PORT,
        Some(p) => p
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid PORT '{}': {}", p, e))?,
    };
    Ok(format!("{}:{}", DEFAULT_HOST, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
