use anyhow::{Context, Result};

/// Service configuration loaded from environment variables once at startup.
/// Handlers receive it through `AppState` and never touch the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Shared secret for the bearer check. `None` disables authentication.
    pub internal_bearer: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            internal_bearer: optional_env("INTERNAL_BEARER"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// An empty value counts as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
