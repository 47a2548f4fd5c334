//! The session: single source of truth for the signed-in client.
//!
//! Replaces the original's global mutable context with an explicit,
//! constructor-injected object. Every server synchronization is a command
//! returning a `Result`; local state commits only after the remote call
//! succeeds, so a failed mutation leaves prior state intact instead of
//! silently diverging from the server.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{AuthSession, Backend, NewCuratedResource, ProfileWire, SignupPayload};
use crate::blend::blend_resources;
use crate::error::ClientError;
use crate::export::export_plan_markdown;
use crate::gateway::{Gateway, GatewayError};
use crate::models::{
    AdminStats, AdminUser, CareerPath, ChatMessage, ChatRole, CuratedResource, ResourceItem,
    Theme, UserProfile,
};
use crate::probes::LinkProbeSet;
use crate::store::StateStore;

impl From<GatewayError> for ClientError {
    fn from(e: GatewayError) -> Self {
        ClientError::Gateway(e.to_string())
    }
}

pub struct Session {
    backend: Arc<dyn Backend>,
    gateway: Gateway,
    store: StateStore,

    token: Option<String>,
    profile: UserProfile,
    search_results: Vec<CareerPath>,
    theme: Theme,
    all_users: Vec<AdminUser>,
    all_saved_careers: Vec<CareerPath>,
    global_resources: Vec<CuratedResource>,
    chat_history: Vec<ChatMessage>,
}

impl Session {
    /// Builds a session from injected collaborators, reading the durable keys
    /// (profile cache, theme, token) and the session-scoped search results.
    pub fn new(backend: Arc<dyn Backend>, gateway: Gateway, store: StateStore) -> Self {
        let profile = store.load_profile().unwrap_or_default();
        let theme = store.load_theme().unwrap_or_default();
        let token = store.load_token();
        let search_results = store.load_search_results();

        Self {
            backend,
            gateway,
            store,
            token,
            profile,
            search_results,
            theme,
            all_users: Vec::new(),
            all_saved_careers: Vec::new(),
            global_resources: Vec::new(),
            chat_history: Vec::new(),
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Read accessors
    // ────────────────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_approved_admin()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn search_results(&self) -> &[CareerPath] {
        &self.search_results
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn all_users(&self) -> &[AdminUser] {
        &self.all_users
    }

    pub fn global_resources(&self) -> &[CuratedResource] {
        &self.global_resources
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    // ────────────────────────────────────────────────────────────────────
    // Auth & hydration
    // ────────────────────────────────────────────────────────────────────

    /// Startup hydration: profile, then saved careers, then (admins only)
    /// the user directory; the curated catalog always.
    pub async fn start(&mut self) -> Result<(), ClientError> {
        if self.token.is_some() {
            if let Err(e) = self.refresh().await {
                // A stale token should not wedge startup; drop to signed-out.
                warn!("startup hydration failed: {e}");
                if matches!(&e, ClientError::Api { status: 401, .. }) {
                    self.logout();
                } else {
                    return Err(e);
                }
            }
        } else {
            self.refresh_global_resources().await?;
        }
        Ok(())
    }

    /// Fetches the caller's server state and commits it locally.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;

        let wire = self.backend.profile(&token).await?;
        let saved = self.backend.my_saved(&token).await?;

        // Completed resources are tracked locally only; carry them across.
        let completed = std::mem::take(&mut self.profile.completed_resources);
        self.profile = UserProfile {
            name: wire.name.clone(),
            email: Some(wire.email.clone()),
            my_skills: wire.skills.clone(),
            saved_careers: saved,
            completed_resources: completed,
            saved_resources: wire.saved_resources.clone(),
            role: wire.role.clone(),
            is_approved: wire.is_approved,
            avatar_seed: wire.avatar_seed,
        };
        self.store.save_profile(&self.profile)?;

        if self.is_admin() {
            self.refresh_admin_listings().await?;
        }
        self.refresh_global_resources().await?;

        Ok(())
    }

    async fn refresh_admin_listings(&mut self) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let users = self.backend.list_users().await?;
        self.all_users = users.into_iter().map(admin_user_from_wire).collect();
        self.all_saved_careers = self.backend.all_saved(&token).await?;
        Ok(())
    }

    async fn refresh_global_resources(&mut self) -> Result<(), ClientError> {
        self.global_resources = self.backend.curated_resources().await?;
        Ok(())
    }

    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        avatar_seed: i32,
    ) -> Result<(), ClientError> {
        let payload = SignupPayload {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            avatar_seed,
            skills: Vec::new(),
        };
        let auth = self.backend.signup(&payload).await?;
        self.commit_auth(auth).await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let auth = self.backend.login(email, password).await?;
        self.commit_auth(auth).await
    }

    async fn commit_auth(&mut self, auth: AuthSession) -> Result<(), ClientError> {
        info!("signed in as {}", auth.email);
        self.store.save_token(&auth.token)?;
        self.token = Some(auth.token);
        self.refresh().await
    }

    /// Clears the token, cached profile, and session search results.
    pub fn logout(&mut self) {
        self.token = None;
        self.profile = UserProfile::default();
        self.all_users.clear();
        self.all_saved_careers.clear();
        self.chat_history.clear();
        self.clear_search_results();
        self.store.clear_token();
        self.store.clear_profile();
    }

    // ────────────────────────────────────────────────────────────────────
    // Skills & career discovery
    // ────────────────────────────────────────────────────────────────────

    pub async fn update_skills(&mut self, skills: Vec<String>) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let wire = self.backend.update_skills(&token, &skills).await?;
        self.profile.my_skills = wire.skills;
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    /// Manual skill entry → gateway suggestions → session search results.
    pub async fn find_careers_by_skills(
        &mut self,
        skills: &[String],
    ) -> Result<&[CareerPath], ClientError> {
        let careers = self.gateway.recommend_careers(skills).await?;
        self.set_search_results(careers)?;
        Ok(&self.search_results)
    }

    /// Direct role search.
    pub async fn find_careers_by_role(
        &mut self,
        role: &str,
    ) -> Result<&[CareerPath], ClientError> {
        let careers = self.gateway.search_by_role(role).await?;
        self.set_search_results(careers)?;
        Ok(&self.search_results)
    }

    /// Resume upload flow: extract skills from the document.
    pub async fn extract_skills_from_resume(
        &self,
        document: &[u8],
        mime_type: &str,
    ) -> Result<Vec<String>, ClientError> {
        Ok(self.gateway.extract_skills(document, mime_type).await?)
    }

    pub fn set_search_results(&mut self, results: Vec<CareerPath>) -> Result<(), ClientError> {
        self.store.save_search_results(&results)?;
        self.search_results = results;
        Ok(())
    }

    pub fn clear_search_results(&mut self) {
        self.store.clear_search_results();
        self.search_results.clear();
    }

    // ────────────────────────────────────────────────────────────────────
    // Career detail & persistence
    // ────────────────────────────────────────────────────────────────────

    /// Loads the detail view for a career: fetches the bridge plan from the
    /// gateway and blends curated resources into its suggestions. A career
    /// that already carries details is returned unchanged.
    pub async fn career_details(&self, career: &CareerPath) -> Result<CareerPath, ClientError> {
        if career.has_details() {
            return Ok(career.clone());
        }

        let details = self
            .gateway
            .detailed_plan(&career.title, &self.profile.my_skills)
            .await?;

        let resources =
            blend_resources(&details.roadmap, &self.global_resources, &details.resources);

        let mut enriched = career.clone();
        enriched.role_overview = details.role_overview;
        if !details.salary_range.is_empty() {
            enriched.salary_range = Some(details.salary_range);
        }
        enriched.roadmap = details.roadmap;
        enriched.resources = resources;
        Ok(enriched)
    }

    /// Persists a career (server upsert), then commits it into the saved
    /// list. Saving an already-saved slug replaces the local copy too.
    pub async fn save_career(&mut self, career: CareerPath) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let saved = self.backend.save_career(&token, &career).await?;

        self.profile
            .saved_careers
            .retain(|c| c.slug != saved.slug);
        self.profile.saved_careers.insert(0, saved);
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    /// Deletes by storage id; the server re-checks ownership.
    pub async fn remove_career(&mut self, id: Uuid) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        self.backend.remove_career(&token, id).await?;

        self.profile.saved_careers.retain(|c| c.id != Some(id));
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────
    // Personal resources & progress
    // ────────────────────────────────────────────────────────────────────

    pub async fn save_resource(&mut self, resource: ResourceItem) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let list = self.backend.save_resource(&token, &resource).await?;
        self.profile.saved_resources = list;
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    pub async fn remove_resource(&mut self, url: &str) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let list = self.backend.remove_resource(&token, url).await?;
        self.profile.saved_resources = list;
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    /// Local-only progress tracking; never synced to the server.
    pub fn toggle_resource_completion(&mut self, url: &str) -> Result<(), ClientError> {
        let completed = &mut self.profile.completed_resources;
        if let Some(pos) = completed.iter().position(|u| u == url) {
            completed.remove(pos);
        } else {
            completed.push(url.to_string());
        }
        self.store.save_profile(&self.profile)?;
        Ok(())
    }

    /// Spawns bounded, cancellable probes for every resource url in a career.
    pub fn validate_links(&self, career: &CareerPath) -> LinkProbeSet {
        let urls = career.resources.iter().map(|r| r.url.clone()).collect();
        LinkProbeSet::spawn(Arc::clone(&self.backend), urls)
    }

    pub fn export_plan(&self, career: &CareerPath) -> String {
        export_plan_markdown(career)
    }

    // ────────────────────────────────────────────────────────────────────
    // Theme
    // ────────────────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Result<Theme, ClientError> {
        self.theme = self.theme.toggled();
        self.store.save_theme(self.theme)?;
        Ok(self.theme)
    }

    // ────────────────────────────────────────────────────────────────────
    // Admin
    // ────────────────────────────────────────────────────────────────────

    pub async fn approve_user(&mut self, id: Uuid) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        self.backend.approve_user(&token, id).await?;
        if let Some(user) = self.all_users.iter_mut().find(|u| u.id == id) {
            user.is_approved = true;
        }
        Ok(())
    }

    pub async fn delete_user(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.backend.delete_user(id).await?;
        self.all_users.retain(|u| u.id != id);
        Ok(())
    }

    pub async fn add_global_resource(
        &mut self,
        resource: NewCuratedResource,
    ) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        let created = self.backend.add_curated_resource(&token, &resource).await?;
        self.global_resources.insert(0, created);
        Ok(())
    }

    pub async fn delete_global_resource(&mut self, id: Uuid) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotSignedIn)?;
        self.backend.delete_curated_resource(&token, id).await?;
        self.global_resources.retain(|r| r.id != Some(id));
        Ok(())
    }

    /// Dashboard tiles, computed from hydrated admin listings.
    pub fn admin_stats(&self) -> AdminStats {
        let total_users = self.all_users.len();
        let total_skills: usize = self.all_users.iter().map(|u| u.skills_count).sum();
        AdminStats {
            total_users,
            total_saved_paths: self.all_saved_careers.len(),
            avg_skills_per_user: total_skills as f64 / total_users.max(1) as f64,
            curated_resources: self.global_resources.len(),
            pending_admins: self
                .all_users
                .iter()
                .filter(|u| u.role == "admin" && !u.is_approved)
                .count(),
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Coach chat
    // ────────────────────────────────────────────────────────────────────

    pub async fn coach_chat(&mut self, message: &str) -> Result<String, ClientError> {
        let reply = match self.gateway.coach_chat(&self.chat_history, message).await {
            Ok(text) => text,
            Err(GatewayError::EmptyContent) => "I couldn't process that request.".to_string(),
            Err(e) => return Err(e.into()),
        };

        self.chat_history.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
        });
        self.chat_history.push(ChatMessage {
            role: ChatRole::Model,
            text: reply.clone(),
        });
        Ok(reply)
    }
}

fn admin_user_from_wire(wire: ProfileWire) -> AdminUser {
    AdminUser {
        id: wire.id,
        name: wire.name,
        email: wire.email,
        role: wire.role,
        is_approved: wire.is_approved,
        join_date: wire.joined_at,
        skills_count: wire.skills.len(),
        saved_paths_count: wire.saved_path_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProfileWire;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory backend covering the calls the session makes. Flip
    /// `fail_mutations` to make every write call error, which is how the
    /// commit-on-success tests force the remote side to reject.
    struct InMemoryBackend {
        profile: Mutex<ProfileWire>,
        saved: Mutex<Vec<CareerPath>>,
        users: Mutex<Vec<ProfileWire>>,
        catalog: Mutex<Vec<CuratedResource>>,
        fail_mutations: AtomicBool,
    }

    fn wire_user(name: &str, email: &str, role: &str, is_approved: bool) -> ProfileWire {
        ProfileWire {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            is_approved,
            joined_at: Utc::now(),
            avatar_seed: 1,
            skills: vec!["React".into(), "SQL".into()],
            saved_resources: vec![],
            skill_count: 2,
            saved_path_count: 0,
        }
    }

    impl InMemoryBackend {
        fn new(role: &str, is_approved: bool) -> Self {
            Self {
                profile: Mutex::new(wire_user("Asha", "asha@example.com", role, is_approved)),
                saved: Mutex::new(Vec::new()),
                users: Mutex::new(vec![
                    wire_user("Asha", "asha@example.com", role, is_approved),
                    wire_user("Pending", "pending@example.com", "admin", false),
                ]),
                catalog: Mutex::new(Vec::new()),
                fail_mutations: AtomicBool::new(false),
            }
        }

        fn reject_mutations(&self) {
            self.fail_mutations.store(true, Ordering::SeqCst);
        }

        fn mutation_gate(&self) -> Result<(), ClientError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                Err(ClientError::Api {
                    status: 500,
                    message: "rejected".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Backend for InMemoryBackend {
        async fn signup(&self, payload: &SignupPayload) -> Result<AuthSession, ClientError> {
            Ok(AuthSession {
                token: "test-token".into(),
                user_id: Uuid::new_v4(),
                name: payload.name.clone(),
                email: payload.email.clone(),
                avatar_seed: payload.avatar_seed,
            })
        }

        async fn login(&self, email: &str, _password: &str) -> Result<AuthSession, ClientError> {
            let profile = self.profile.lock().unwrap();
            Ok(AuthSession {
                token: "test-token".into(),
                user_id: profile.id,
                name: profile.name.clone(),
                email: email.into(),
                avatar_seed: profile.avatar_seed,
            })
        }

        async fn profile(&self, _token: &str) -> Result<ProfileWire, ClientError> {
            Ok(self.profile.lock().unwrap().clone())
        }

        async fn update_skills(
            &self,
            _token: &str,
            skills: &[String],
        ) -> Result<ProfileWire, ClientError> {
            self.mutation_gate()?;
            let mut profile = self.profile.lock().unwrap();
            profile.skills = skills.to_vec();
            profile.skill_count = skills.len() as i32;
            Ok(profile.clone())
        }

        async fn approve_user(&self, _token: &str, id: Uuid) -> Result<(), ClientError> {
            self.mutation_gate()?;
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.is_approved = true;
                    Ok(())
                }
                None => Err(ClientError::Api {
                    status: 404,
                    message: "User not found".into(),
                }),
            }
        }

        async fn save_resource(
            &self,
            _token: &str,
            resource: &ResourceItem,
        ) -> Result<Vec<ResourceItem>, ClientError> {
            self.mutation_gate()?;
            let mut profile = self.profile.lock().unwrap();
            if profile.saved_resources.iter().any(|r| r.url == resource.url) {
                return Err(ClientError::Api {
                    status: 400,
                    message: "Resource already saved".into(),
                });
            }
            profile.saved_resources.push(resource.clone());
            Ok(profile.saved_resources.clone())
        }

        async fn remove_resource(
            &self,
            _token: &str,
            url: &str,
        ) -> Result<Vec<ResourceItem>, ClientError> {
            self.mutation_gate()?;
            let mut profile = self.profile.lock().unwrap();
            profile.saved_resources.retain(|r| r.url != url);
            Ok(profile.saved_resources.clone())
        }

        async fn save_career(
            &self,
            _token: &str,
            career: &CareerPath,
        ) -> Result<CareerPath, ClientError> {
            self.mutation_gate()?;
            let mut saved = self.saved.lock().unwrap();
            // Upsert on slug, mirroring the server's (user_id, slug) key.
            let mut stored = career.clone();
            if let Some(existing) = saved.iter_mut().find(|c| c.slug == career.slug) {
                stored.id = existing.id;
                *existing = stored.clone();
            } else {
                stored.id = Some(Uuid::new_v4());
                saved.insert(0, stored.clone());
            }
            Ok(stored)
        }

        async fn my_saved(&self, _token: &str) -> Result<Vec<CareerPath>, ClientError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn all_saved(&self, _token: &str) -> Result<Vec<CareerPath>, ClientError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn remove_career(&self, _token: &str, id: Uuid) -> Result<(), ClientError> {
            self.mutation_gate()?;
            let mut saved = self.saved.lock().unwrap();
            let before = saved.len();
            saved.retain(|c| c.id != Some(id));
            if saved.len() == before {
                return Err(ClientError::Api {
                    status: 404,
                    message: "Career path not found or you are not authorized to delete it"
                        .into(),
                });
            }
            Ok(())
        }

        async fn curated_resources(&self) -> Result<Vec<CuratedResource>, ClientError> {
            Ok(self.catalog.lock().unwrap().clone())
        }

        async fn add_curated_resource(
            &self,
            _token: &str,
            resource: &NewCuratedResource,
        ) -> Result<CuratedResource, ClientError> {
            self.mutation_gate()?;
            let created = CuratedResource {
                id: Some(Uuid::new_v4()),
                title: resource.title.clone(),
                url: resource.url.clone(),
                kind: resource.kind.clone(),
                duration: resource.duration.clone(),
                tags: resource.tags.clone(),
            };
            self.catalog.lock().unwrap().insert(0, created.clone());
            Ok(created)
        }

        async fn delete_curated_resource(&self, _token: &str, id: Uuid) -> Result<(), ClientError> {
            self.mutation_gate()?;
            self.catalog.lock().unwrap().retain(|r| r.id != Some(id));
            Ok(())
        }

        async fn validate_link(&self, _url: &str) -> Result<bool, ClientError> {
            Ok(true)
        }

        async fn list_users(&self) -> Result<Vec<ProfileWire>, ClientError> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn delete_user(&self, id: Uuid) -> Result<(), ClientError> {
            self.mutation_gate()?;
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }

    fn test_session(backend: Arc<InMemoryBackend>) -> (Session, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::open(tmp.path()).unwrap();
        let session = Session::new(backend, Gateway::new("test-key".into()), store);
        (session, tmp)
    }

    fn career(slug: &str) -> CareerPath {
        CareerPath {
            id: None,
            slug: slug.into(),
            title: "Data Engineer".into(),
            description: "Builds pipelines.".into(),
            match_percentage: Some(80),
            role_overview: vec![],
            salary_range: None,
            required_skills: vec![],
            roadmap: vec![],
            resources: vec![],
        }
    }

    #[tokio::test]
    async fn test_login_hydrates_profile_and_catalog() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(Arc::clone(&backend));

        session.login("asha@example.com", "pw").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.profile().name, "Asha");
        assert_eq!(session.profile().my_skills.len(), 2);
        assert!(!session.is_admin());
        // Non-admins never receive the user directory.
        assert!(session.all_users().is_empty());
    }

    #[tokio::test]
    async fn test_admin_login_hydrates_directory_and_stats() {
        let backend = Arc::new(InMemoryBackend::new("admin", true));
        let (mut session, _tmp) = test_session(backend);

        session.login("asha@example.com", "pw").await.unwrap();

        assert!(session.is_admin());
        assert_eq!(session.all_users().len(), 2);
        let stats = session.admin_stats();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.pending_admins, 1);
        assert!((stats.avg_skills_per_user - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_save_career_twice_keeps_one_entry() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(backend);
        session.login("asha@example.com", "pw").await.unwrap();

        session.save_career(career("data_engineer_002")).await.unwrap();
        let mut updated = career("data_engineer_002");
        updated.match_percentage = Some(91);
        session.save_career(updated).await.unwrap();

        let saved = &session.profile().saved_careers;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].match_percentage, Some(91));
        assert!(saved[0].id.is_some());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_intact() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(Arc::clone(&backend));
        session.login("asha@example.com", "pw").await.unwrap();

        backend.reject_mutations();

        let err = session
            .update_skills(vec!["Go".into()])
            .await
            .expect_err("mutation should fail");
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
        // Prior state intact: no optimistic local write.
        assert_eq!(session.profile().my_skills, vec!["React", "SQL"]);

        let err = session
            .save_career(career("ml_engineer_003"))
            .await
            .expect_err("save should fail");
        assert!(matches!(err, ClientError::Api { .. }));
        assert!(session.profile().saved_careers.is_empty());
    }

    #[tokio::test]
    async fn test_remove_career_deletes_by_storage_id() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(backend);
        session.login("asha@example.com", "pw").await.unwrap();

        session.save_career(career("qa_engineer_001")).await.unwrap();
        let id = session.profile().saved_careers[0].id.unwrap();

        session.remove_career(id).await.unwrap();
        assert!(session.profile().saved_careers.is_empty());

        // Removing again reports the collapsed not-found error.
        let err = session.remove_career(id).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_logout_clears_session_scoped_state() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(backend);
        session.login("asha@example.com", "pw").await.unwrap();
        session
            .set_search_results(vec![career("devops_engineer_001")])
            .unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.search_results().is_empty());
        assert_eq!(session.profile().name, "");
    }

    #[tokio::test]
    async fn test_toggle_resource_completion_is_local_only() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(Arc::clone(&backend));
        session.login("asha@example.com", "pw").await.unwrap();

        // Remote rejections cannot affect a local-only toggle.
        backend.reject_mutations();
        session
            .toggle_resource_completion("https://example.com/course")
            .unwrap();
        assert_eq!(session.profile().completed_resources.len(), 1);
        session
            .toggle_resource_completion("https://example.com/course")
            .unwrap();
        assert!(session.profile().completed_resources.is_empty());
    }

    #[tokio::test]
    async fn test_career_details_returns_detailed_career_unchanged() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (session, _tmp) = test_session(backend);

        let mut detailed = career("cloud_architect_001");
        detailed.roadmap = vec![crate::models::RoadmapStep {
            title: "Terraform".into(),
            description: "IaC".into(),
            duration: None,
        }];
        detailed.role_overview = vec!["Designs platforms".into()];

        let result = session.career_details(&detailed).await.unwrap();
        assert_eq!(result, detailed);
    }

    #[tokio::test]
    async fn test_approve_user_updates_directory_entry() {
        let backend = Arc::new(InMemoryBackend::new("admin", true));
        let (mut session, _tmp) = test_session(backend);
        session.login("asha@example.com", "pw").await.unwrap();

        let pending = session
            .all_users()
            .iter()
            .find(|u| !u.is_approved)
            .unwrap()
            .id;
        session.approve_user(pending).await.unwrap();

        assert!(session.all_users().iter().all(|u| u.is_approved));
        assert_eq!(session.admin_stats().pending_admins, 0);
    }

    #[tokio::test]
    async fn test_duplicate_saved_resource_is_rejected_remotely() {
        let backend = Arc::new(InMemoryBackend::new("user", false));
        let (mut session, _tmp) = test_session(backend);
        session.login("asha@example.com", "pw").await.unwrap();

        let resource = ResourceItem {
            title: "CKA Prep".into(),
            url: "https://example.com/cka".into(),
            kind: "Course".into(),
            duration: None,
        };
        session.save_resource(resource.clone()).await.unwrap();
        let err = session.save_resource(resource).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
        assert_eq!(session.profile().saved_resources.len(), 1);
    }
}
