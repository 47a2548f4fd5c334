use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An admin-curated resource in the global catalog.
/// Tags drive the client-side blending against roadmap step titles.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedResourceRow {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}
