//! Read-only views over the link store
//!
//! Each view clones one snapshot of the table first and computes
//! everything from it, so figures within one result never mix states.

use std::cmp::Ordering;

use chrono::Utc;

use super::{LinkStats, LinkStore, ShortLink};

/// Descending `created_at`, later insertions first on ties
fn newest_first(a: &ShortLink, b: &ShortLink) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.seq.cmp(&a.seq))
}

/// Descending `access_count`, then [`newest_first`]
fn most_accessed_first(a: &ShortLink, b: &ShortLink) -> Ordering {
    b.access_count
        .cmp(&a.access_count)
        .then_with(|| newest_first(a, b))
}

impl LinkStore {
    /// Links created by `owner_id`, newest first
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<ShortLink> {
        let mut links: Vec<ShortLink> = self
            .snapshot()
            .into_iter()
            .filter(|link| link.owner_id == owner_id)
            .collect();
        links.sort_by(newest_first);
        links
    }

    /// Owner's links whose URL or code contains `query`, ignoring case
    pub fn search(&self, query: &str, owner_id: &str) -> Vec<ShortLink> {
        let needle = query.to_lowercase();
        let mut links: Vec<ShortLink> = self
            .snapshot()
            .into_iter()
            .filter(|link| {
                link.owner_id == owner_id
                    && (link.original_url.to_lowercase().contains(&needle)
                        || link.code.to_lowercase().contains(&needle))
            })
            .collect();
        links.sort_by(newest_first);
        links
    }

    pub fn top_by_access_count(&self, n: usize) -> Vec<ShortLink> {
        let mut links = self.snapshot();
        links.sort_by(most_accessed_first);
        links.truncate(n);
        links
    }

    pub fn most_recent(&self, n: usize) -> Vec<ShortLink> {
        let mut links = self.snapshot();
        links.sort_by(newest_first);
        links.truncate(n);
        links
    }

    /// Every stored link, newest first
    pub fn all_links(&self) -> Vec<ShortLink> {
        self.most_recent(usize::MAX)
    }

    pub fn stats(&self) -> LinkStats {
        let links = self.snapshot();
        let now = Utc::now();

        let total_links = links.len();
        let active_links = links.iter().filter(|link| link.is_active_at(now)).count();
        let total_accesses: u64 = links.iter().map(|link| link.access_count).sum();
        let average_accesses = if total_links == 0 {
            0.0
        } else {
            total_accesses as f64 / total_links as f64
        };
        let most_popular = links
            .iter()
            .filter(|link| link.access_count > 0)
            .min_by(|a, b| most_accessed_first(a, b))
            .cloned();

        LinkStats {
            total_links,
            active_links,
            total_users: 0,
            total_accesses,
            average_accesses,
            most_popular,
        }
    }
}
