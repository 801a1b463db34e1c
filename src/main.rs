//! shelter-helper server entry point.
//!
//! Loads configuration, opens the JSON stores and serves the site.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shelter_helper::api;
use shelter_helper::app_state::AppState;
use shelter_helper::config::{self, ShelterConfig};
use shelter_helper::views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config::json_logs_requested() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = ShelterConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(addr = %config.listen_addr, ?config, "starting shelter-helper");
    views::check_templates().context("page templates failed to compile")?;

    // Build application state
    let listen_addr = config.listen_addr;
    let app_state = AppState::initialize(config).await;

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
