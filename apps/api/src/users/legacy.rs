//! Legacy unnamespaced user CRUD (`/users`, `/user/:id`), retained for the
//! admin panel. Deliberately mirrors the original surface: no bearer check.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::envelope::Data;
use crate::errors::AppError;
use crate::models::user::{PublicUser, UserRow, ROLE_ADMIN, ROLE_USER};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<PublicUser>>>, AppError> {
    let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY joined_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Data::json(rows.into_iter().map(PublicUser::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub avatar_seed: i32,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Data<PublicUser>>, AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }
    if req.role != ROLE_USER && req.role != ROLE_ADMIN {
        return Err(AppError::Validation(format!("Unknown role '{}'", req.role)));
    }

    let password_hash = hash_password(&req.password)?;
    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users
            (id, name, email, password_hash, role, is_approved, joined_at,
             avatar_seed, skills, saved_resources, skill_count, saved_path_count)
        VALUES ($1, $2, $3, $4, $5, FALSE, NOW(), $6, '{}', '[]'::jsonb, 0, 0)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(&password_hash)
    .bind(&req.role)
    .bind(req.avatar_seed)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Email already registered".into())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Data::json(PublicUser::from(row)))
}

/// GET /user/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Data<PublicUser>>, AppError> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let row = row.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Data::json(PublicUser::from(row)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_approved: Option<bool>,
    pub skills: Option<Vec<String>>,
}

/// PUT /user/:id
///
/// Partial update; absent fields keep their stored values.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Data<PublicUser>>, AppError> {
    if let Some(role) = &req.role {
        if role != ROLE_USER && role != ROLE_ADMIN {
            return Err(AppError::Validation(format!("Unknown role '{role}'")));
        }
    }
    let skill_count = req.skills.as_ref().map(|s| s.len() as i32);

    let row: Option<UserRow> = sqlx::query_as(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            role = COALESCE($4, role),
            is_approved = COALESCE($5, is_approved),
            skills = COALESCE($6, skills),
            skill_count = COALESCE($7, skill_count)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.name.as_deref())
    .bind(req.email.as_deref())
    .bind(req.role.as_deref())
    .bind(req.is_approved)
    .bind(req.skills.as_deref())
    .bind(skill_count)
    .fetch_optional(&state.db)
    .await?;
    let row = row.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Data::json(PublicUser::from(row)))
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
    pub data: PublicUser,
}

/// DELETE /user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteUserResponse>, AppError> {
    let row: Option<UserRow> = sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let row = row.ok_or_else(|| AppError::NotFound("User not found".into()))?;
    info!("user {} deleted", row.email);

    Ok(Json(DeleteUserResponse {
        success: true,
        message: "User deleted successfully".into(),
        data: PublicUser::from(row),
    }))
}
