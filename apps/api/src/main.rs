mod ads;
mod auth;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::{build_router, ADS_AGENT_PATH};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ads agent API v{}", env!("CARGO_PKG_VERSION"));

    let llm = OpenAiClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    if config.internal_bearer.is_some() {
        info!("Bearer authentication enabled for {ADS_AGENT_PATH}");
    } else {
        info!("INTERNAL_BEARER not set; {ADS_AGENT_PATH} accepts unauthenticated requests");
    }

    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
