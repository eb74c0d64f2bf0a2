//! Link shortening service
//!
//! Ties the identity registry, the link store and the reclamation process
//! together behind one handle.

use std::time::Duration;

use chrono::TimeDelta;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::identity::{User, UserRegistry};
use crate::reclamation::{Reclaimer, SweepReport, sweep_expired};
use crate::storage::{LinkStats, LinkStore, ShortLink, StoreOptions};

/// Options for starting a [`ShortenerService`]
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    /// Display prefix for [`ShortenerService::short_url`]
    pub base_url: String,
    pub store: StoreOptions,
    pub cleanup_interval: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for ServiceOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            store: StoreOptions::from(config),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_minutes.saturating_mul(60)),
        }
    }
}

impl ServiceOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_code_length(mut self, length: usize) -> Self {
        self.store = self.store.with_code_length(length);
        self
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.store = self.store.with_ttl(ttl);
        self
    }

    pub fn with_max_url_length(mut self, max: usize) -> Self {
        self.store = self.store.with_max_url_length(max);
        self
    }

    pub fn with_max_code_attempts(mut self, attempts: u32) -> Self {
        self.store = self.store.with_max_code_attempts(attempts);
        self
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}

/// Service for link management operations
///
/// Link operations are synchronous in-memory calls; only starting and
/// shutting down the reclamation process involves the Tokio runtime.
#[derive(Debug)]
pub struct ShortenerService {
    users: UserRegistry,
    store: LinkStore,
    reclaimer: Reclaimer,
    base_url: String,
}

impl ShortenerService {
    /// Build the service and spawn its reclamation task
    ///
    /// Fails with `Config` for unusable options and with `Runtime` when
    /// called outside a Tokio runtime.
    pub fn start(options: ServiceOptions) -> Result<Self> {
        options.store.validate()?;

        let users = UserRegistry::new();
        let store = LinkStore::new(users.clone(), options.store);
        let reclaimer = Reclaimer::spawn(store.clone(), options.cleanup_interval)?;

        Ok(Self {
            users,
            store,
            reclaimer,
            base_url: options.base_url,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::start(ServiceOptions::from(config))
    }

    // ============ Users ============

    pub fn create_user(&self, name: impl Into<String>) -> User {
        self.users.create_user(name)
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.users.get_user(id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ============ Links ============

    pub fn create_link(
        &self,
        original_url: &str,
        owner_id: &str,
        max_access_count: Option<u64>,
    ) -> Result<String> {
        self.store.create(original_url, owner_id, max_access_count)
    }

    pub fn resolve_link(&self, code: &str) -> Result<String> {
        self.store.resolve(code)
    }

    pub fn delete_link(&self, code: &str, requester_id: &str) -> Result<()> {
        self.store.delete(code, requester_id)
    }

    pub fn update_limit(&self, code: &str, requester_id: &str, new_max: Option<u64>) -> Result<()> {
        self.store.update_limit(code, requester_id, new_max)
    }

    pub fn get_link(&self, code: &str) -> Option<ShortLink> {
        self.store.get(code)
    }

    /// Full display URL for a code
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }

    // ============ Queries ============

    pub fn list_owned(&self, owner_id: &str) -> Vec<ShortLink> {
        self.store.list_by_owner(owner_id)
    }

    pub fn search(&self, query: &str, owner_id: &str) -> Vec<ShortLink> {
        self.store.search(query, owner_id)
    }

    pub fn top_by_access_count(&self, n: usize) -> Vec<ShortLink> {
        self.store.top_by_access_count(n)
    }

    pub fn most_recent(&self, n: usize) -> Vec<ShortLink> {
        self.store.most_recent(n)
    }

    pub fn all_links(&self) -> Vec<ShortLink> {
        self.store.all_links()
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats {
            total_users: self.users.len(),
            ..self.store.stats()
        }
    }

    // ============ Lifecycle ============

    /// Run one reclamation sweep immediately
    pub fn reclaim_now(&self) -> SweepReport {
        sweep_expired(&self.store)
    }

    pub fn is_reclaimer_running(&self) -> bool {
        self.reclaimer.is_running()
    }

    /// Stop the reclamation process; an in-flight sweep completes first
    pub async fn shutdown(&self) {
        self.reclaimer.shutdown().await;
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }
}
