//! Link availability probe.
//!
//! `POST /api/resources/validate-link` never fails from the caller's view:
//! connect errors, timeouts, and 4xx/5xx statuses all report `isValid: false`.

use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateLinkRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateLinkResponse {
    pub success: bool,
    pub is_valid: bool,
}

/// POST /api/resources/validate-link
pub async fn validate_link(
    State(state): State<AppState>,
    Json(req): Json<ValidateLinkRequest>,
) -> Result<Json<ValidateLinkResponse>, AppError> {
    let url = req
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("URL is required".into()))?;

    let timeout = Duration::from_millis(state.config.link_check_timeout_ms);
    let is_valid = probe_url(&state.http, &url, timeout).await;

    Ok(Json(ValidateLinkResponse {
        success: true,
        is_valid,
    }))
}

/// HEAD-probes a url, reporting reachability as a boolean.
pub async fn probe_url(client: &reqwest::Client, url: &str, timeout: Duration) -> bool {
    match client.head(url).timeout(timeout).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            (200..400).contains(&status)
        }
        Err(e) => {
            debug!("link probe failed for {url}: {e}");
            false
        }
    }
}
