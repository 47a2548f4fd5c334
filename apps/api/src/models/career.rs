use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// An ordered milestone in a learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A learning resource attached to a career plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A career path a user has saved.
///
/// `id` is the canonical storage identifier. `slug` is the client-supplied
/// semantic id (e.g. `product_manager_001`) kept as the upsert key within a
/// user's collection and as a display field.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCareerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub match_percentage: Option<i32>,
    pub role_overview: Vec<String>,
    pub salary_range: Option<String>,
    pub required_skills: Vec<String>,
    pub roadmap: Json<Vec<RoadmapStep>>,
    pub resources: Json<Vec<ResourceItem>>,
    pub created_at: DateTime<Utc>,
}
