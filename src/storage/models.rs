use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default)]
    pub max_access_count: Option<u64>,

    /// Insertion order, breaks `created_at` ties
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl ShortLink {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_limit_reached(&self) -> bool {
        self.max_access_count
            .is_some_and(|max| self.access_count >= max)
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && !self.is_limit_reached()
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

impl fmt::Display for ShortLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_active() { "ACTIVE" } else { "INACTIVE" };
        let limit = match self.max_access_count {
            Some(max) => format!("limit: {}", max),
            None => "no limit".to_string(),
        };
        write!(
            f,
            "{} -> {} [accesses: {} ({}), created: {}, expires: {}] - {}",
            self.code,
            self.original_url,
            self.access_count,
            limit,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.expires_at.format("%Y-%m-%d %H:%M:%S"),
            status
        )
    }
}

/// Aggregate figures computed over one snapshot of the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total_links: usize,
    pub active_links: usize,
    /// Filled in by the service layer; the store alone reports 0
    pub total_users: usize,
    pub total_accesses: u64,
    pub average_accesses: f64,
    /// Most accessed link, absent when nothing has been accessed yet
    pub most_popular: Option<ShortLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn link(expires_in: TimeDelta, access_count: u64, max: Option<u64>) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            owner_id: "owner".to_string(),
            created_at: now,
            expires_at: now + expires_in,
            access_count,
            max_access_count: max,
            seq: 0,
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let l = link(TimeDelta::hours(1), 0, None);
        assert!(!l.is_expired_at(l.expires_at - TimeDelta::milliseconds(1)));
        assert!(l.is_expired_at(l.expires_at));
    }

    #[test]
    fn test_limit_reached() {
        assert!(!link(TimeDelta::hours(1), 5, None).is_limit_reached());
        assert!(!link(TimeDelta::hours(1), 1, Some(2)).is_limit_reached());
        assert!(link(TimeDelta::hours(1), 2, Some(2)).is_limit_reached());
    }

    #[test]
    fn test_active_requires_both_conditions() {
        assert!(link(TimeDelta::hours(1), 0, Some(1)).is_active());
        assert!(!link(TimeDelta::hours(1), 1, Some(1)).is_active());
        assert!(!link(TimeDelta::hours(-1), 0, None).is_active());
    }

    #[test]
    fn test_display_shows_status_and_limit() {
        let active = link(TimeDelta::hours(1), 1, Some(3)).to_string();
        assert!(active.starts_with("abc123 -> https://example.com"));
        assert!(active.contains("accesses: 1 (limit: 3)"));
        assert!(active.ends_with("ACTIVE"));

        let unlimited = link(TimeDelta::hours(1), 0, None).to_string();
        assert!(unlimited.contains("no limit"));

        let expired = link(TimeDelta::hours(-1), 0, None).to_string();
        assert!(expired.ends_with("INACTIVE"));
    }

    #[test]
    fn test_serialization_skips_sequence() {
        let json = serde_json::to_value(link(TimeDelta::hours(1), 0, None)).unwrap();
        assert!(json.get("seq").is_none());
        assert_eq!(json["original_url"], "https://example.com");
    }
}
