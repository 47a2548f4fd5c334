//! Typed REST transport for the Catalyst API.
//!
//! `Backend` is the seam between [`crate::session::Session`] and the network:
//! the session holds an `Arc<dyn Backend>`, so tests drive it with an
//! in-memory fake instead of a live server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::{CareerPath, CuratedResource, ResourceItem};

/// Full user projection as the API returns it (password hash never present).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWire {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub avatar_seed: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub saved_resources: Vec<ResourceItem>,
    #[serde(default)]
    pub skill_count: i32,
    #[serde(default)]
    pub saved_path_count: i32,
}

/// Token plus the signup/login user payload the session needs.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_seed: i32,
}

#[derive(Debug, Clone)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub avatar_seed: i32,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewCuratedResource {
    pub title: String,
    pub url: String,
    pub kind: String,
    pub duration: Option<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn signup(&self, payload: &SignupPayload) -> Result<AuthSession, ClientError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError>;

    async fn profile(&self, token: &str) -> Result<ProfileWire, ClientError>;
    async fn update_skills(&self, token: &str, skills: &[String])
        -> Result<ProfileWire, ClientError>;
    async fn approve_user(&self, token: &str, id: Uuid) -> Result<(), ClientError>;
    async fn save_resource(
        &self,
        token: &str,
        resource: &ResourceItem,
    ) -> Result<Vec<ResourceItem>, ClientError>;
    async fn remove_resource(&self, token: &str, url: &str)
        -> Result<Vec<ResourceItem>, ClientError>;

    async fn save_career(&self, token: &str, career: &CareerPath)
        -> Result<CareerPath, ClientError>;
    async fn my_saved(&self, token: &str) -> Result<Vec<CareerPath>, ClientError>;
    async fn all_saved(&self, token: &str) -> Result<Vec<CareerPath>, ClientError>;
    async fn remove_career(&self, token: &str, id: Uuid) -> Result<(), ClientError>;

    async fn curated_resources(&self) -> Result<Vec<CuratedResource>, ClientError>;
    async fn add_curated_resource(
        &self,
        token: &str,
        resource: &NewCuratedResource,
    ) -> Result<CuratedResource, ClientError>;
    async fn delete_curated_resource(&self, token: &str, id: Uuid) -> Result<(), ClientError>;
    async fn validate_link(&self, url: &str) -> Result<bool, ClientError>;

    // Legacy admin-panel surface
    async fn list_users(&self) -> Result<Vec<ProfileWire>, ClientError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), ClientError>;
}

/// reqwest-backed implementation speaking the `{success, data|message}` envelope.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Reads the response body, enforcing both HTTP status and the envelope's
/// `success` flag, then extracts the named payload field.
async fn read_payload<T: DeserializeOwned>(
    resp: reqwest::Response,
    field: &str,
) -> Result<T, ClientError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    let success = body
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !(200..300).contains(&status) || !success {
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("request failed")
            .to_string();
        debug!("api call failed ({status}): {message}");
        return Err(ClientError::Api { status, message });
    }
    let payload = body
        .get(field)
        .cloned()
        .ok_or_else(|| ClientError::Api {
            status,
            message: format!("response missing '{field}' field"),
        })?;
    Ok(serde_json::from_value(payload)?)
}

/// As `read_payload`, for endpoints that confirm without returning data.
async fn read_ack(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    let success = body
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !(200..300).contains(&status) || !success {
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("request failed")
            .to_string();
        return Err(ClientError::Api { status, message });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUserWire {
    id: Uuid,
    name: String,
    email: String,
    #[serde(default)]
    avatar_seed: i32,
}

async fn read_auth(resp: reqwest::Response) -> Result<AuthSession, ClientError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    let success = body
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !(200..300).contains(&status) || !success {
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("request failed")
            .to_string();
        return Err(ClientError::Api { status, message });
    }
    let token = body
        .get("token")
        .and_then(|v| v.as_str())
        .ok_or(ClientError::Api {
            status,
            message: "response missing 'token' field".into(),
        })?
        .to_string();
    let user: AuthUserWire =
        serde_json::from_value(body.get("user").cloned().unwrap_or_default())?;
    Ok(AuthSession {
        token,
        user_id: user.id,
        name: user.name,
        email: user.email,
        avatar_seed: user.avatar_seed,
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn signup(&self, payload: &SignupPayload) -> Result<AuthSession, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&serde_json::json!({
                "name": payload.name,
                "email": payload.email,
                "password": payload.password,
                "role": payload.role,
                "avatarSeed": payload.avatar_seed,
                "skills": payload.skills,
            }))
            .send()
            .await?;
        read_auth(resp).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        read_auth(resp).await
    }

    async fn profile(&self, token: &str) -> Result<ProfileWire, ClientError> {
        let resp = self
            .client
            .get(self.url("/api/user/profile"))
            .bearer_auth(token)
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn update_skills(
        &self,
        token: &str,
        skills: &[String],
    ) -> Result<ProfileWire, ClientError> {
        let resp = self
            .client
            .put(self.url("/api/user/skills"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "skills": skills }))
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn approve_user(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .patch(self.url(&format!("/api/user/approve/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_ack(resp).await
    }

    async fn save_resource(
        &self,
        token: &str,
        resource: &ResourceItem,
    ) -> Result<Vec<ResourceItem>, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/user/resources/save"))
            .bearer_auth(token)
            .json(resource)
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn remove_resource(
        &self,
        token: &str,
        url: &str,
    ) -> Result<Vec<ResourceItem>, ClientError> {
        let resp = self
            .client
            .delete(self.url("/api/user/resources/remove"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn save_career(
        &self,
        token: &str,
        career: &CareerPath,
    ) -> Result<CareerPath, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/career/save"))
            .bearer_auth(token)
            .json(career)
            .send()
            .await?;
        read_payload(resp, "saved").await
    }

    async fn my_saved(&self, token: &str) -> Result<Vec<CareerPath>, ClientError> {
        let resp = self
            .client
            .get(self.url("/api/career/my-saved"))
            .bearer_auth(token)
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn all_saved(&self, token: &str) -> Result<Vec<CareerPath>, ClientError> {
        let resp = self
            .client
            .get(self.url("/api/career/all-saved"))
            .bearer_auth(token)
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn remove_career(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/career/remove/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_ack(resp).await
    }

    async fn curated_resources(&self) -> Result<Vec<CuratedResource>, ClientError> {
        let resp = self.client.get(self.url("/api/resources")).send().await?;
        read_payload(resp, "data").await
    }

    async fn add_curated_resource(
        &self,
        token: &str,
        resource: &NewCuratedResource,
    ) -> Result<CuratedResource, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/resources"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "title": resource.title,
                "url": resource.url,
                "type": resource.kind,
                "duration": resource.duration,
                "tags": resource.tags,
            }))
            .send()
            .await?;
        read_payload(resp, "data").await
    }

    async fn delete_curated_resource(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/resources/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_ack(resp).await
    }

    async fn validate_link(&self, url: &str) -> Result<bool, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/resources/validate-link"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;
        read_payload(resp, "isValid").await
    }

    async fn list_users(&self) -> Result<Vec<ProfileWire>, ClientError> {
        let resp = self.client.get(self.url("/users")).send().await?;
        read_payload(resp, "data").await
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/user/{id}")))
            .send()
            .await?;
        read_ack(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_handles_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(
            backend.url("/api/resources"),
            "http://localhost:8000/api/resources"
        );
    }

    #[test]
    fn test_profile_wire_parses_api_projection() {
        let wire: ProfileWire = serde_json::from_str(
            r#"{
                "id": "6a8f9f8e-4a76-4a0e-9d5a-0b1e7a3c2d11",
                "name": "Asha",
                "email": "asha@example.com",
                "role": "user",
                "isApproved": false,
                "joinedAt": "2026-01-15T10:00:00Z",
                "avatarSeed": 4,
                "skills": ["React", "SQL"],
                "savedResources": [],
                "skillCount": 2,
                "savedPathCount": 0
            }"#,
        )
        .unwrap();
        assert_eq!(wire.skills.len(), 2);
        assert_eq!(wire.avatar_seed, 4);
    }
}
