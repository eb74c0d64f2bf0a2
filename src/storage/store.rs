use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::{InvalidInput, Result, TinylinkError};
use crate::identity::UserRegistry;
use crate::storage::ShortLink;
use crate::utils::generate_random_code;
use crate::utils::url_validator::validate_url;

/// Runtime parameters of the link store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub code_length: usize,
    /// Fixed lifetime applied at creation
    pub ttl: TimeDelta,
    pub max_url_length: usize,
    /// Candidate codes tried before giving up on a creation
    pub max_code_attempts: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for StoreOptions {
    fn from(config: &EngineConfig) -> Self {
        let hours = i64::try_from(config.default_ttl_hours).unwrap_or(i64::MAX);
        Self {
            code_length: config.short_code_length,
            ttl: TimeDelta::try_hours(hours).unwrap_or(TimeDelta::MAX),
            max_url_length: config.max_url_length,
            max_code_attempts: config.max_code_attempts,
        }
    }
}

impl StoreOptions {
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_url_length(mut self, max: usize) -> Self {
        self.max_url_length = max;
        self
    }

    pub fn with_max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 {
            return Err(TinylinkError::config("code length must be at least 1"));
        }
        if self.max_code_attempts == 0 {
            return Err(TinylinkError::config("max code attempts must be at least 1"));
        }
        if self.ttl < TimeDelta::zero() {
            return Err(TinylinkError::config("link TTL must not be negative"));
        }
        Ok(())
    }
}

/// Thread-safe mapping from short code to [`ShortLink`]
///
/// Every operation on a single code runs under that key's `DashMap` shard
/// lock, so create, resolve, delete, limit update and reclamation removal
/// are linearizable per code. Operations on different codes interleave
/// freely. Clones share the same underlying table.
#[derive(Debug, Clone)]
pub struct LinkStore {
    links: Arc<DashMap<String, ShortLink>>,
    users: UserRegistry,
    options: StoreOptions,
    next_seq: Arc<AtomicU64>,
}

impl LinkStore {
    pub fn new(users: UserRegistry, options: StoreOptions) -> Self {
        Self {
            links: Arc::new(DashMap::new()),
            users,
            options,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Create a new short link and return its code
    ///
    /// The candidate code is claimed through `DashMap::entry`, so two
    /// concurrent creations can never both win the same code. After
    /// `max_code_attempts` collisions the call fails with
    /// [`TinylinkError::CodeSpaceExhausted`] instead of spinning.
    pub fn create(
        &self,
        original_url: &str,
        owner_id: &str,
        max_access_count: Option<u64>,
    ) -> Result<String> {
        validate_url(original_url, self.options.max_url_length)?;

        if !self.users.contains(owner_id) {
            return Err(InvalidInput::UnknownOwner(owner_id.to_string()).into());
        }
        if max_access_count == Some(0) {
            return Err(InvalidInput::InvalidLimit.into());
        }

        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(self.options.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        for attempt in 1..=self.options.max_code_attempts {
            let candidate = generate_random_code(self.options.code_length);
            match self.links.entry(candidate) {
                Entry::Vacant(slot) => {
                    let code = slot.key().clone();
                    slot.insert(ShortLink {
                        code: code.clone(),
                        original_url: original_url.to_string(),
                        owner_id: owner_id.to_string(),
                        created_at,
                        expires_at,
                        access_count: 0,
                        max_access_count,
                        seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    });
                    info!("Created short link {} -> {} (owner {})", code, original_url, owner_id);
                    return Ok(code);
                }
                Entry::Occupied(taken) => {
                    debug!(
                        "Short code collision on {} (attempt {}/{})",
                        taken.key(),
                        attempt,
                        self.options.max_code_attempts
                    );
                }
            }
        }

        Err(TinylinkError::code_space_exhausted(format!(
            "No free short code of length {} after {} attempts",
            self.options.code_length, self.options.max_code_attempts
        )))
    }

    /// Resolve a code to its original URL, counting one access
    ///
    /// The expiry check, the limit check and the increment happen under
    /// the entry lock. A failed resolution never changes the entry.
    pub fn resolve(&self, code: &str) -> Result<String> {
        let mut link = self
            .links
            .get_mut(code)
            .ok_or_else(|| TinylinkError::not_found(format!("Short link not found: {}", code)))?;

        if link.is_expired_at(Utc::now()) {
            debug!("Resolution of expired link {}", code);
            return Err(TinylinkError::expired(format!("Short link has expired: {}", code)));
        }

        if link.is_limit_reached() {
            debug!("Resolution of exhausted link {}", code);
            return Err(TinylinkError::limit_reached(format!(
                "Access limit reached for short link: {}",
                code
            )));
        }

        link.access_count += 1;
        Ok(link.original_url.clone())
    }

    /// Remove a link owned by `requester_id`
    ///
    /// A non-owner gets the same `NotFound` as for an absent code.
    pub fn delete(&self, code: &str, requester_id: &str) -> Result<()> {
        match self
            .links
            .remove_if(code, |_, link| link.owner_id == requester_id)
        {
            Some(_) => {
                info!("Deleted short link {}", code);
                Ok(())
            }
            None => {
                debug!("Delete of {} by {} rejected", code, requester_id);
                Err(TinylinkError::not_found(format!("Short link not found: {}", code)))
            }
        }
    }

    /// Replace the access limit (`None` clears it). The access count is kept.
    pub fn update_limit(
        &self,
        code: &str,
        requester_id: &str,
        new_max: Option<u64>,
    ) -> Result<()> {
        let mut link = self
            .links
            .get_mut(code)
            .filter(|link| link.owner_id == requester_id)
            .ok_or_else(|| TinylinkError::not_found(format!("Short link not found: {}", code)))?;

        if new_max == Some(0) {
            return Err(InvalidInput::InvalidLimit.into());
        }

        link.max_access_count = new_max;
        match new_max {
            Some(max) => info!("Access limit for {} set to {}", code, max),
            None => info!("Access limit for {} removed", code),
        }
        Ok(())
    }

    /// Side-effect-free lookup; does not count as an access
    pub fn get(&self, code: &str) -> Option<ShortLink> {
        self.links.get(code).map(|link| link.value().clone())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.links.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Clone every stored link
    pub fn snapshot(&self) -> Vec<ShortLink> {
        self.links.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Codes of links expired as of `now`, paired with the code stored
    /// inside the entry (used by reclamation to spot mismatched entries)
    pub(crate) fn expired_keys(&self, now: DateTime<Utc>) -> Vec<(String, String)> {
        self.links
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| (entry.key().clone(), entry.value().code.clone()))
            .collect()
    }

    /// Remove `code` if it is still expired as of `now`
    pub(crate) fn remove_if_expired(&self, code: &str, now: DateTime<Utc>) -> bool {
        self.links
            .remove_if(code, |_, link| link.is_expired_at(now))
            .is_some()
    }
}
