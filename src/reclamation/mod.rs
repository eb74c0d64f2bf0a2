//! 过期链接回收
//!
//! A periodic task that removes time-expired links from the [`LinkStore`].
//! Links that only exhausted their access limit stay stored until they
//! expire or are deleted by their owner.

mod task;

pub use task::Reclaimer;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::storage::LinkStore;

/// 回收报告
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries found expired during the scan
    pub scanned: usize,
    /// Entries actually removed
    pub removed: usize,
    /// Entries that vanished or changed between scan and removal
    pub skipped: usize,
}

/// Run one sweep over the store
///
/// Removal re-checks expiry under the entry lock, so a concurrent
/// resolve or delete on the same code is never interleaved with it.
/// An anomalous entry is logged and skipped; the sweep carries on.
pub fn sweep_expired(store: &LinkStore) -> SweepReport {
    let now = Utc::now();
    let candidates = store.expired_keys(now);
    let mut report = SweepReport {
        scanned: candidates.len(),
        ..Default::default()
    };

    for (key, stored_code) in candidates {
        if key != stored_code {
            warn!(
                "Reclamation: entry {} carries mismatched code {}, removing anyway",
                key, stored_code
            );
        }

        if store.remove_if_expired(&key, now) {
            report.removed += 1;
        } else {
            debug!("Reclamation: {} already gone, skipping", key);
            report.skipped += 1;
        }
    }

    if report.removed > 0 {
        info!("Reclamation: removed {} expired links", report.removed);
    } else {
        debug!("Reclamation: nothing to remove");
    }

    report
}
