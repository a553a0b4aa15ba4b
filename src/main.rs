//! Match insight server: enriches esports matches with recent form,
//! head-to-head history and map winrate hints.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use crate::config::AppConfig;
use insight_api::{create_app, AppState};
use insight_services::{EnrichmentService, HttpProvider};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "match_insight=debug,insight_services=debug,insight_api=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting match insight service");

    // Load configuration
    let config = AppConfig::new().context("failed to load configuration")?;
    info!("✅ Configuration loaded successfully");
    info!("🔌 Upstream: {}", config.upstream.base_url);
    info!("🌐 Server will bind to: {}", config.server_addr());

    let provider = HttpProvider::new(config.provider_config())?;
    let enrichment = Arc::new(EnrichmentService::new(Arc::new(provider)));
    let state = AppState::new(enrichment, config.limits(), config.enrichment.max_limit);

    let listener = tokio::net::TcpListener::bind(config.server_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr()))?;

    info!("⌨️  Press Ctrl+C to stop");
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
    }
}
