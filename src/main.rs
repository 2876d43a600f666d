use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use traffy_fondue::bots::BotRegistry;
use traffy_fondue::config::AppConfig;
use traffy_fondue::line::{HttpTransport, LineClient};
use traffy_fondue::server;
use traffy_fondue::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up BOTS_CONFIG, LINE_* etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Traffy Fondue admin API in {:?} mode", config.environment);

    let bots = BotRegistry::load(config.bots_file.as_deref()).context("failed to load bot registry")?;
    tracing::info!(bots = ?bots.keys().collect::<Vec<_>>(), "bot registry loaded");

    let transport = HttpTransport::new(config.line.timeout()).context("failed to build LINE HTTP client")?;
    let line = LineClient::new(Arc::new(transport), &config.line);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let app = server::app(AppState::new(config, bots, line));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Traffy Fondue admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
