//! Axum route handlers for signup and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{LoginUser, PublicUser, UserRow, ROLE_ADMIN, ROLE_USER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Explicitly requested role. "admin" accounts start unapproved and are
    /// unusable as admins until approved by an existing admin.
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub avatar_seed: i32,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: LoginUser,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }
    if req.role != ROLE_USER && req.role != ROLE_ADMIN {
        return Err(AppError::Validation(format!("Unknown role '{}'", req.role)));
    }

    let existing: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&req.password)?;
    let skill_count = req.skills.len() as i32;

    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users
            (id, name, email, password_hash, role, is_approved, joined_at,
             avatar_seed, skills, saved_resources, skill_count, saved_path_count)
        VALUES ($1, $2, $3, $4, $5, FALSE, NOW(), $6, $7, '[]'::jsonb, $8, 0)
        RETURNING *
        "#,
    )
    .bind(uuid::Uuid::new_v4())
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(&password_hash)
    .bind(&req.role)
    .bind(req.avatar_seed)
    .bind(&req.skills)
    .bind(skill_count)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        // Two near-simultaneous signups can both pass the pre-check; the
        // unique index decides the winner.
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Email already registered".into())
        }
        _ => AppError::Database(e),
    })?;

    let token = jwt::sign(row.id, &state.config.jwt_secret)?;
    info!("new {} account registered: {}", row.role, row.email);

    Ok(Json(AuthResponse {
        success: true,
        user: PublicUser::from(row),
        token,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !verify_password(&req.password, &row.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = jwt::sign(row.id, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: LoginUser::from(&row),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_defaults() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name": "Asha", "email": "asha@example.com", "password": "pw"}"#,
        )
        .unwrap();
        assert_eq!(req.role, ROLE_USER);
        assert_eq!(req.avatar_seed, 0);
        assert!(req.skills.is_empty());
    }

    #[test]
    fn test_signup_request_explicit_admin_role() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name": "A", "email": "a@b.c", "password": "pw", "role": "admin", "avatarSeed": 3}"#,
        )
        .unwrap();
        assert_eq!(req.role, ROLE_ADMIN);
        assert_eq!(req.avatar_seed, 3);
    }
}
