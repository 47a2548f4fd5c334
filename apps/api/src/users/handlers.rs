//! Axum route handlers for the user profile surface:
//! profile fetch, skill replacement, admin approval, and the per-user
//! saved-resource list.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use sqlx::types::Json as Jsonb;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::envelope::Data;
use crate::errors::AppError;
use crate::models::user::{PublicUser, SavedResource, UserRow};
use crate::state::AppState;

async fn fetch_user(state: &AppState, id: Uuid) -> Result<UserRow, AppError> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    row.ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Data<PublicUser>>, AppError> {
    let row = fetch_user(&state, user_id).await?;
    Ok(Data::json(PublicUser::from(row)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillsRequest {
    pub skills: Vec<String>,
}

/// PUT /api/user/skills
///
/// Replaces the skill list wholesale and recomputes the count.
pub async fn update_skills(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateSkillsRequest>,
) -> Result<Json<Data<PublicUser>>, AppError> {
    let skill_count = req.skills.len() as i32;
    let row: Option<UserRow> = sqlx::query_as(
        "UPDATE users SET skills = $2, skill_count = $3 WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(&req.skills)
    .bind(skill_count)
    .fetch_optional(&state.db)
    .await?;
    let row = row.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Data::json(PublicUser::from(row)))
}

/// PATCH /api/user/approve/:id
///
/// Idempotently flips the approval flag; gates admin-role activation.
pub async fn approve_user(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Data<PublicUser>>, AppError> {
    let row: Option<UserRow> =
        sqlx::query_as("UPDATE users SET is_approved = TRUE WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    info!("user {} approved", row.email);
    Ok(Data::json(PublicUser::from(row)))
}

/// POST /api/user/resources/save
///
/// Appends to the caller's saved-resource list, rejecting a duplicate url.
pub async fn save_resource(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(resource): Json<SavedResource>,
) -> Result<Json<Data<Vec<SavedResource>>>, AppError> {
    let row = fetch_user(&state, user_id).await?;

    let mut saved = row.saved_resources.0;
    if saved.iter().any(|r| r.url == resource.url) {
        return Err(AppError::Conflict("Resource already saved".into()));
    }
    saved.push(resource);

    sqlx::query("UPDATE users SET saved_resources = $2 WHERE id = $1")
        .bind(user_id)
        .bind(Jsonb(&saved))
        .execute(&state.db)
        .await?;

    Ok(Data::json(saved))
}

#[derive(Debug, Deserialize)]
pub struct RemoveResourceRequest {
    pub url: String,
}

/// DELETE /api/user/resources/remove
///
/// Removing an absent url is a no-op that still returns the current list.
pub async fn remove_resource(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<RemoveResourceRequest>,
) -> Result<Json<Data<Vec<SavedResource>>>, AppError> {
    let row = fetch_user(&state, user_id).await?;

    let mut saved = row.saved_resources.0;
    saved.retain(|r| r.url != req.url);

    sqlx::query("UPDATE users SET saved_resources = $2 WHERE id = $1")
        .bind(user_id)
        .bind(Jsonb(&saved))
        .execute(&state.db)
        .await?;

    Ok(Data::json(saved))
}
