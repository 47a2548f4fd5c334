use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// A learning resource the user bookmarked against their own profile.
/// Stored as a JSONB list on the users row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// "user" or "admin". An admin account is unusable until approved.
    pub role: String,
    pub is_approved: bool,
    pub joined_at: DateTime<Utc>,
    pub avatar_seed: i32,
    pub skills: Vec<String>,
    pub saved_resources: Json<Vec<SavedResource>>,
    pub skill_count: i32,
    pub saved_path_count: i32,
}

impl UserRow {
    pub fn is_approved_admin(&self) -> bool {
        self.role == ROLE_ADMIN && self.is_approved
    }
}

/// Full user projection with the password hash stripped.
/// The only user shape that ever leaves the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
    pub joined_at: DateTime<Utc>,
    pub avatar_seed: i32,
    pub skills: Vec<String>,
    pub saved_resources: Vec<SavedResource>,
    pub skill_count: i32,
    pub saved_path_count: i32,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        PublicUser {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            is_approved: row.is_approved,
            joined_at: row.joined_at,
            avatar_seed: row.avatar_seed,
            skills: row.skills,
            saved_resources: row.saved_resources.0,
            skill_count: row.skill_count,
            saved_path_count: row.saved_path_count,
        }
    }
}

/// Reduced projection returned by login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_seed: i32,
}

impl From<&UserRow> for LoginUser {
    fn from(row: &UserRow) -> Self {
        LoginUser {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            avatar_seed: row.avatar_seed,
        }
    }
}
