use std::path::PathBuf;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Catalyst REST API, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    /// Key for the generative-AI gateway.
    pub gateway_api_key: String,
    /// Directory for durable client state (profile cache, theme, token).
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ClientConfig {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            gateway_api_key: require_env("GATEWAY_API_KEY")?,
            state_dir: std::env::var("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".catalyst")),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
