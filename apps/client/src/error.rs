use thiserror::Error;

/// Client-side error type. Every `Session` command returns `Result<_, ClientError>`
/// so callers can decide between surfacing, retrying, or ignoring.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("State store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Gateway error: {0}")]
    Gateway(String),
}
