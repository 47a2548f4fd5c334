//! Axum route handlers for the admin-curated resource catalog.
//!
//! Listing is anonymous; mutation requires an approved admin account.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::envelope::{Data, Message};
use crate::errors::AppError;
use crate::models::resource::CuratedResourceRow;
use crate::state::AppState;

const RESOURCE_KINDS: [&str; 3] = ["Article", "Video", "Course"];

/// Named capability check for catalog mutation.
async fn require_approved_admin(state: &AppState, user_id: Uuid) -> Result<(), AppError> {
    let row: Option<(String, bool)> =
        sqlx::query_as("SELECT role, is_approved FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    match row {
        Some((role, true)) if role == crate::models::user::ROLE_ADMIN => Ok(()),
        _ => Err(AppError::Forbidden("Admin approval required".into())),
    }
}

/// GET /api/resources
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<CuratedResourceRow>>>, AppError> {
    let rows: Vec<CuratedResourceRow> =
        sqlx::query_as("SELECT * FROM resources ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Data::json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// POST /api/resources
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Json<Data<CuratedResourceRow>>, AppError> {
    require_approved_admin(&state, user_id).await?;

    if req.title.trim().is_empty() || req.url.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }
    if !RESOURCE_KINDS.contains(&req.kind.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown resource type '{}'",
            req.kind
        )));
    }

    // Tags are matched as lowercase substrings during client-side blending.
    let tags: Vec<String> = req.tags.iter().map(|t| t.to_lowercase()).collect();

    let row: CuratedResourceRow = sqlx::query_as(
        r#"
        INSERT INTO resources (id, title, url, kind, duration, tags, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(req.url.trim())
    .bind(&req.kind)
    .bind(req.duration.as_deref())
    .bind(&tags)
    .fetch_one(&state.db)
    .await?;

    info!("curated resource '{}' added", row.title);
    Ok(Data::json(row))
}

/// DELETE /api/resources/:id
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    require_approved_admin(&state, user_id).await?;

    let deleted: Option<(Uuid,)> =
        sqlx::query_as("DELETE FROM resources WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    if deleted.is_none() {
        return Err(AppError::NotFound("Resource not found".into()));
    }

    Ok(Message::json("Resource deleted"))
}
