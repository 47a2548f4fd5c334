//! Axum route handlers for saved career paths.
//!
//! Saving is an upsert keyed on `(user_id, slug)`: saving the same suggestion
//! twice overwrites the first record instead of duplicating it. Deletion
//! requires both the record id and the owner to match.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as Jsonb;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::envelope::{Data, Message};
use crate::errors::AppError;
use crate::models::career::{ResourceItem, RoadmapStep, SavedCareerRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCareerRequest {
    /// Client-side semantic id, e.g. `product_manager_001`.
    pub slug: String,
    pub title: String,
    pub description: String,
    pub match_percentage: Option<i32>,
    #[serde(default)]
    pub role_overview: Vec<String>,
    pub salary_range: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default)]
    pub resources: Vec<ResourceItem>,
}

#[derive(Debug, Serialize)]
pub struct SaveCareerResponse {
    pub success: bool,
    pub saved: SavedCareerRow,
}

/// POST /api/career/save
pub async fn save_career(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<SaveCareerRequest>,
) -> Result<Json<SaveCareerResponse>, AppError> {
    if req.slug.trim().is_empty() || req.title.trim().is_empty() || req.description.trim().is_empty()
    {
        return Err(AppError::Validation("Missing required fields".into()));
    }

    let row: SavedCareerRow = sqlx::query_as(
        r#"
        INSERT INTO saved_careers
            (id, user_id, slug, title, description, match_percentage,
             role_overview, salary_range, required_skills, roadmap, resources, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
        ON CONFLICT (user_id, slug) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            match_percentage = EXCLUDED.match_percentage,
            role_overview = EXCLUDED.role_overview,
            salary_range = EXCLUDED.salary_range,
            required_skills = EXCLUDED.required_skills,
            roadmap = EXCLUDED.roadmap,
            resources = EXCLUDED.resources
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(req.slug.trim())
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.match_percentage)
    .bind(&req.role_overview)
    .bind(req.salary_range.as_deref())
    .bind(&req.required_skills)
    .bind(Jsonb(&req.roadmap))
    .bind(Jsonb(&req.resources))
    .fetch_one(&state.db)
    .await?;

    sync_saved_path_count(&state, user_id).await?;
    info!("career '{}' saved for user {user_id}", row.slug);

    Ok(Json(SaveCareerResponse {
        success: true,
        saved: row,
    }))
}

/// GET /api/career/my-saved
pub async fn my_saved(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Data<Vec<SavedCareerRow>>>, AppError> {
    let rows: Vec<SavedCareerRow> = sqlx::query_as(
        "SELECT * FROM saved_careers WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Data::json(rows))
}

/// GET /api/career/all-saved
///
/// Cross-user read backing the admin dashboard's aggregate statistics.
pub async fn all_saved(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Data<Vec<SavedCareerRow>>>, AppError> {
    let rows: Vec<SavedCareerRow> =
        sqlx::query_as("SELECT * FROM saved_careers ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Data::json(rows))
}

/// DELETE /api/career/remove/:id
///
/// Matching on both record id and owner collapses "absent" and "not yours"
/// into one 404; a split response would leak other users' record ids.
pub async fn remove_career(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    let deleted: Option<(Uuid,)> =
        sqlx::query_as("DELETE FROM saved_careers WHERE id = $1 AND user_id = $2 RETURNING id")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

    if deleted.is_none() {
        return Err(AppError::NotFound(
            "Career path not found or you are not authorized to delete it".into(),
        ));
    }

    sync_saved_path_count(&state, user_id).await?;

    Ok(Message::json("Career path removed successfully"))
}

async fn sync_saved_path_count(state: &AppState, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET saved_path_count = (SELECT COUNT(*) FROM saved_careers WHERE user_id = $1)
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(&state.db)
    .await?;
    Ok(())
}
