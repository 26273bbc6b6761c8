// SentiMine V1 Backend Entry Point
// HTTP surface for the sentiment mining demo

mod classifier;
mod config;
mod error;
mod miner;
mod models;
mod routes;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use classifier::HfClassifier;
use config::AppConfig;
use routes::AppState;

/// Installs the global tracing subscriber (bunyan-formatted JSON on stdout,
/// filterable through `RUST_LOG`).
fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("sentimine-server".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_telemetry()?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let state = AppState {
        classifier: Arc::new(HfClassifier::new(&config)),
    };
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Backend running on port {}", config.port);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
