//! Domain types held in client session state.
//!
//! Wire casing is camelCase end-to-end; the REST rows and the gateway's
//! suggestion shapes both deserialize into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered milestone in a learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A learning resource (AI-suggested, curated, or bookmarked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A career path: the gateway's suggestion shape, optionally persisted.
///
/// `id` is the storage identifier, present only once saved. `slug` is the
/// semantic id the gateway mints (e.g. `product_manager_001`) and the upsert
/// key on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<i32>,
    #[serde(default)]
    pub role_overview: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default)]
    pub resources: Vec<ResourceItem>,
}

impl CareerPath {
    /// Details are fetched lazily; a search result has neither roadmap nor
    /// overview until the detail view loads them.
    pub fn has_details(&self) -> bool {
        !self.roadmap.is_empty() && !self.role_overview.is_empty()
    }
}

/// An admin-curated catalog resource. Tags drive blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CuratedResource {
    pub fn as_item(&self) -> ResourceItem {
        ResourceItem {
            title: self.title.clone(),
            url: self.url.clone(),
            kind: self.kind.clone(),
            duration: self.duration.clone(),
        }
    }
}

/// The signed-in user's profile as the session holds it: the server
/// projection merged with the locally tracked completed-resource list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub my_skills: Vec<String>,
    #[serde(default)]
    pub saved_careers: Vec<CareerPath>,
    /// Local-only progress tracking, never synced to the server.
    #[serde(default)]
    pub completed_resources: Vec<String>,
    #[serde(default)]
    pub saved_resources: Vec<ResourceItem>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub avatar_seed: i32,
}

impl UserProfile {
    pub fn is_approved_admin(&self) -> bool {
        self.role == "admin" && self.is_approved
    }
}

/// A row in the admin user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
    pub join_date: DateTime<Utc>,
    pub skills_count: usize,
    pub saved_paths_count: i32,
}

/// Aggregate numbers for the admin dashboard tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_saved_paths: usize,
    pub avg_skills_per_user: f64,
    pub curated_resources: usize,
    pub pending_admins: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the career-coach chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_path_deserializes_search_result_without_details() {
        let career: CareerPath = serde_json::from_str(
            r#"{
                "slug": "product_manager_001",
                "title": "Product Manager",
                "description": "Owns the roadmap.",
                "matchPercentage": 82,
                "requiredSkills": ["Communication", "SQL"],
                "salaryRange": "₹18L - ₹35L PA"
            }"#,
        )
        .unwrap();
        assert!(career.id.is_none());
        assert!(!career.has_details());
        assert_eq!(career.match_percentage, Some(82));
    }

    #[test]
    fn test_theme_toggle_roundtrip() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_profile_admin_requires_approval() {
        let mut profile = UserProfile {
            role: "admin".into(),
            ..Default::default()
        };
        assert!(!profile.is_approved_admin());
        profile.is_approved = true;
        assert!(profile.is_approved_admin());
    }
}
