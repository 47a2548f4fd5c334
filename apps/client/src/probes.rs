//! Concurrent link validation with bounded fan-out.
//!
//! Each url in a loaded career is probed independently through the API's
//! validate-link endpoint; a per-url map tracks `Checking → Valid | Invalid`.
//! Dropping the set aborts in-flight probes, tying their lifetime to the
//! owning view.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::api::Backend;
use crate::models::ResourceItem;

/// How many probes may be in flight at once.
pub const MAX_IN_FLIGHT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Checking,
    Valid,
    Invalid,
}

pub struct LinkProbeSet {
    statuses: Arc<Mutex<HashMap<String, LinkStatus>>>,
    tasks: JoinSet<()>,
}

impl LinkProbeSet {
    /// Starts a probe per url. A probe that errors reports `Invalid`; the
    /// endpoint itself already folds timeouts and bad statuses into `false`.
    pub fn spawn(backend: Arc<dyn Backend>, urls: Vec<String>) -> Self {
        let statuses = Arc::new(Mutex::new(
            urls.iter()
                .map(|u| (u.clone(), LinkStatus::Checking))
                .collect::<HashMap<_, _>>(),
        ));
        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
        let mut tasks = JoinSet::new();

        for url in urls {
            let backend = Arc::clone(&backend);
            let statuses = Arc::clone(&statuses);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                let status = match backend.validate_link(&url).await {
                    Ok(true) => LinkStatus::Valid,
                    Ok(false) => LinkStatus::Invalid,
                    Err(e) => {
                        debug!("link probe for {url} failed: {e}");
                        LinkStatus::Invalid
                    }
                };
                statuses
                    .lock()
                    .expect("status map poisoned")
                    .insert(url, status);
            });
        }

        Self { statuses, tasks }
    }

    pub fn status(&self, url: &str) -> LinkStatus {
        self.statuses
            .lock()
            .expect("status map poisoned")
            .get(url)
            .copied()
            .unwrap_or(LinkStatus::Checking)
    }

    pub fn snapshot(&self) -> HashMap<String, LinkStatus> {
        self.statuses.lock().expect("status map poisoned").clone()
    }

    /// Waits for every outstanding probe to finish.
    pub async fn join_all(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }

    /// Explicit cancellation; dropping the set has the same effect.
    pub fn cancel(&mut self) {
        self.tasks.abort_all();
    }
}

/// Stable partition for the resource list view: `Invalid` entries sink to the
/// bottom while `Valid`/`Checking` entries keep their original relative order.
pub fn partition_by_status(
    items: &[ResourceItem],
    statuses: &HashMap<String, LinkStatus>,
) -> Vec<ResourceItem> {
    let is_invalid = |item: &ResourceItem| {
        statuses.get(&item.url).copied().unwrap_or(LinkStatus::Checking) == LinkStatus::Invalid
    };
    let mut ordered: Vec<ResourceItem> =
        items.iter().filter(|i| !is_invalid(i)).cloned().collect();
    ordered.extend(items.iter().filter(|i| is_invalid(i)).cloned());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthSession, NewCuratedResource, ProfileWire, SignupPayload};
    use crate::error::ClientError;
    use crate::models::{CareerPath, CuratedResource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Backend fake: urls containing "dead" validate false, others true.
    /// Tracks the peak number of concurrent probes.
    struct FakeBackend {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                current: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn validate_link(&self, url: &str) -> Result<bool, ClientError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(!url.contains("dead"))
        }

        async fn signup(&self, _: &SignupPayload) -> Result<AuthSession, ClientError> {
            unimplemented!()
        }
        async fn login(&self, _: &str, _: &str) -> Result<AuthSession, ClientError> {
            unimplemented!()
        }
        async fn profile(&self, _: &str) -> Result<ProfileWire, ClientError> {
            unimplemented!()
        }
        async fn update_skills(&self, _: &str, _: &[String]) -> Result<ProfileWire, ClientError> {
            unimplemented!()
        }
        async fn approve_user(&self, _: &str, _: Uuid) -> Result<(), ClientError> {
            unimplemented!()
        }
        async fn save_resource(
            &self,
            _: &str,
            _: &ResourceItem,
        ) -> Result<Vec<ResourceItem>, ClientError> {
            unimplemented!()
        }
        async fn remove_resource(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Vec<ResourceItem>, ClientError> {
            unimplemented!()
        }
        async fn save_career(&self, _: &str, _: &CareerPath) -> Result<CareerPath, ClientError> {
            unimplemented!()
        }
        async fn my_saved(&self, _: &str) -> Result<Vec<CareerPath>, ClientError> {
            unimplemented!()
        }
        async fn all_saved(&self, _: &str) -> Result<Vec<CareerPath>, ClientError> {
            unimplemented!()
        }
        async fn remove_career(&self, _: &str, _: Uuid) -> Result<(), ClientError> {
            unimplemented!()
        }
        async fn curated_resources(&self) -> Result<Vec<CuratedResource>, ClientError> {
            unimplemented!()
        }
        async fn add_curated_resource(
            &self,
            _: &str,
            _: &NewCuratedResource,
        ) -> Result<CuratedResource, ClientError> {
            unimplemented!()
        }
        async fn delete_curated_resource(&self, _: &str, _: Uuid) -> Result<(), ClientError> {
            unimplemented!()
        }
        async fn list_users(&self) -> Result<Vec<ProfileWire>, ClientError> {
            unimplemented!()
        }
        async fn delete_user(&self, _: Uuid) -> Result<(), ClientError> {
            unimplemented!()
        }
    }

    fn item(url: &str) -> ResourceItem {
        ResourceItem {
            title: url.into(),
            url: url.into(),
            kind: "Article".into(),
            duration: None,
        }
    }

    #[tokio::test]
    async fn test_probe_set_resolves_statuses() {
        let backend = Arc::new(FakeBackend::new());
        let urls = vec![
            "https://example.com/live".to_string(),
            "https://example.com/dead".to_string(),
        ];
        let mut set = LinkProbeSet::spawn(backend, urls);
        set.join_all().await;

        assert_eq!(set.status("https://example.com/live"), LinkStatus::Valid);
        assert_eq!(set.status("https://example.com/dead"), LinkStatus::Invalid);
        assert_eq!(set.status("https://example.com/unknown"), LinkStatus::Checking);
    }

    #[tokio::test]
    async fn test_fan_out_is_bounded() {
        let backend = Arc::new(FakeBackend::new());
        let urls: Vec<String> = (0..20).map(|i| format!("https://example.com/{i}")).collect();
        let mut set = LinkProbeSet::spawn(Arc::clone(&backend) as Arc<dyn Backend>, urls);
        set.join_all().await;

        assert!(backend.peak.load(Ordering::SeqCst) <= MAX_IN_FLIGHT);
    }

    #[tokio::test]
    async fn test_cancel_leaves_remaining_as_checking() {
        let backend = Arc::new(FakeBackend::new());
        let urls: Vec<String> = (0..50).map(|i| format!("https://example.com/{i}")).collect();
        let mut set = LinkProbeSet::spawn(backend, urls);
        set.cancel();
        set.join_all().await;

        let snapshot = set.snapshot();
        // Every url still has an entry; aborted probes never left Checking.
        assert_eq!(snapshot.len(), 50);
    }

    #[test]
    fn test_partition_sinks_invalid_keeping_relative_order() {
        let items = vec![item("a"), item("b"), item("c"), item("d")];
        let mut statuses = HashMap::new();
        statuses.insert("a".to_string(), LinkStatus::Invalid);
        statuses.insert("b".to_string(), LinkStatus::Valid);
        statuses.insert("d".to_string(), LinkStatus::Valid);
        // "c" stays Checking.

        let ordered = partition_by_status(&items, &statuses);
        let urls: Vec<&str> = ordered.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "c", "d", "a"]);
    }
}
