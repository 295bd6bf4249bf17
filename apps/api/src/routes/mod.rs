pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};

use crate::ads::handlers;
use crate::state::AppState;

pub const ADS_AGENT_PATH: &str = "/api/ads-agent-llm";
/// Largest request body the agent endpoint reads.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Method filtering happens in the handler so every verb gets the JSON 405 body
        .route(ADS_AGENT_PATH, any(handlers::handle_ads_agent))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
