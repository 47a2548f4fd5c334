use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Outbound HTTP client, used only by the link-validation HEAD probe.
    pub http: reqwest::Client,
    pub config: Config,
}
