//! Durable client-side state.
//!
//! The localStorage/sessionStorage analogue: profile cache, theme, and token
//! survive restarts; search results live for one session and are cleared on
//! logout. Each key is one JSON file under the configured state directory.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::ClientError;
use crate::models::{CareerPath, Theme, UserProfile};

const PROFILE_KEY: &str = "profile.json";
const THEME_KEY: &str = "theme.json";
const TOKEN_KEY: &str = "token.json";
const SEARCH_KEY: &str = "search_results.json";

pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("corrupt state file {}: {e}", path.display());
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(self.path(key), bytes)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let path = self.path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("failed to remove {}: {e}", path.display());
            }
        }
    }

    pub fn load_profile(&self) -> Option<UserProfile> {
        self.read(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), ClientError> {
        self.write(PROFILE_KEY, profile)
    }

    pub fn clear_profile(&self) {
        self.remove(PROFILE_KEY);
    }

    pub fn load_theme(&self) -> Option<Theme> {
        self.read(THEME_KEY)
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), ClientError> {
        self.write(THEME_KEY, &theme)
    }

    pub fn load_token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn save_token(&self, token: &str) -> Result<(), ClientError> {
        self.write(TOKEN_KEY, &token)
    }

    pub fn clear_token(&self) {
        self.remove(TOKEN_KEY);
    }

    pub fn load_search_results(&self) -> Vec<CareerPath> {
        self.read(SEARCH_KEY).unwrap_or_default()
    }

    pub fn save_search_results(&self, results: &[CareerPath]) -> Result<(), ClientError> {
        self.write(SEARCH_KEY, &results)
    }

    pub fn clear_search_results(&self) {
        self.remove(SEARCH_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::open(tmp.path()).unwrap();

        assert!(store.load_profile().is_none());

        let profile = UserProfile {
            name: "Asha".into(),
            my_skills: vec!["React".into()],
            ..Default::default()
        };
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile().unwrap();
        assert_eq!(loaded.name, "Asha");
        assert_eq!(loaded.my_skills, vec!["React".to_string()]);
    }

    #[test]
    fn test_corrupt_file_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::open(tmp.path()).unwrap();
        fs::write(tmp.path().join(PROFILE_KEY), b"{{{not json").unwrap();
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn test_theme_and_token_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::open(tmp.path()).unwrap();

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme(), Some(Theme::Dark));

        store.save_token("jwt-token").unwrap();
        assert_eq!(store.load_token().as_deref(), Some("jwt-token"));
        store.clear_token();
        assert!(store.load_token().is_none());
    }

    #[test]
    fn test_search_results_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::open(tmp.path()).unwrap();

        let results = vec![CareerPath {
            id: None,
            slug: "qa_engineer_001".into(),
            title: "QA Engineer".into(),
            description: "Breaks things first.".into(),
            match_percentage: None,
            role_overview: vec![],
            salary_range: None,
            required_skills: vec![],
            roadmap: vec![],
            resources: vec![],
        }];
        store.save_search_results(&results).unwrap();
        assert_eq!(store.load_search_results().len(), 1);

        store.clear_search_results();
        assert!(store.load_search_results().is_empty());
    }
}
