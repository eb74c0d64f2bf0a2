//! Reclamation process tests

use std::time::Duration;

use chrono::TimeDelta;
use tinylink::identity::UserRegistry;
use tinylink::reclamation::{Reclaimer, SweepReport, sweep_expired};
use tinylink::storage::{LinkStore, StoreOptions};

fn store_with_ttl(ttl: TimeDelta) -> (LinkStore, String) {
    let users = UserRegistry::new();
    let owner = users.create_user("Owner").id;
    (LinkStore::new(users, StoreOptions::default().with_ttl(ttl)), owner)
}

#[test]
fn test_sweep_removes_only_expired() {
    let (store, owner) = store_with_ttl(TimeDelta::milliseconds(100));
    let old = store.create("https://old.com", &owner, None).unwrap();
    std::thread::sleep(Duration::from_millis(150));
    let fresh = store.create("https://fresh.com", &owner, None).unwrap();

    let report = sweep_expired(&store);
    assert_eq!(report.scanned, 1);
    assert_eq!(report.removed, 1);
    assert!(!store.contains(&old));
    assert!(store.contains(&fresh));
}

#[test]
fn test_sweep_keeps_limit_exhausted_links() {
    let (store, owner) = store_with_ttl(TimeDelta::hours(1));
    let code = store.create("https://once.com", &owner, Some(1)).unwrap();
    store.resolve(&code).unwrap();
    assert!(store.resolve(&code).is_err());

    let report = sweep_expired(&store);
    assert_eq!(report.removed, 0);
    assert!(store.contains(&code));
}

#[test]
fn test_sweep_is_idempotent() {
    let (store, owner) = store_with_ttl(TimeDelta::zero());
    for i in 0..10 {
        store
            .create(&format!("https://site{}.com", i), &owner, None)
            .unwrap();
    }

    let first = sweep_expired(&store);
    assert_eq!(first.scanned, 10);
    assert_eq!(first.removed, 10);
    assert!(store.is_empty());

    let second = sweep_expired(&store);
    assert_eq!(second, SweepReport::default());
}

#[test]
fn test_sweep_after_ttl_elapses() {
    let (store, owner) = store_with_ttl(TimeDelta::milliseconds(100));
    let code = store.create("https://brief.com", &owner, None).unwrap();

    assert_eq!(sweep_expired(&store).removed, 0);
    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(sweep_expired(&store).removed, 1);
    assert!(!store.contains(&code));
}

#[test]
fn test_sweep_concurrent_with_resolution() {
    let (store, owner) = store_with_ttl(TimeDelta::zero());
    let codes: Vec<String> = (0..200)
        .map(|_| store.create("https://example.com", &owner, None).unwrap())
        .collect();

    let removed = std::thread::scope(|s| {
        let sweeper = s.spawn(|| sweep_expired(&store).removed);
        s.spawn(|| {
            for code in &codes {
                assert!(store.resolve(code).is_err());
            }
        });
        sweeper.join().unwrap()
    });

    assert_eq!(removed + sweep_expired(&store).removed, 200);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_background_task_reclaims_periodically() {
    let (store, owner) = store_with_ttl(TimeDelta::milliseconds(20));
    let reclaimer = Reclaimer::spawn(store.clone(), Duration::from_millis(30)).unwrap();
    assert!(reclaimer.is_running());
    assert_eq!(reclaimer.interval(), Duration::from_millis(30));

    let code = store.create("https://temp.com", &owner, None).unwrap();
    assert!(store.contains(&code));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!store.contains(&code));

    reclaimer.shutdown().await;
    assert!(!reclaimer.is_running());
}

#[tokio::test]
async fn test_no_sweeps_after_shutdown() {
    let (store, owner) = store_with_ttl(TimeDelta::zero());
    let reclaimer = Reclaimer::spawn(store.clone(), Duration::from_millis(20)).unwrap();

    reclaimer.shutdown().await;
    // Second call is a no-op
    reclaimer.shutdown().await;

    let code = store.create("https://left-alone.com", &owner, None).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(store.contains(&code));
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    let (store, _) = store_with_ttl(TimeDelta::hours(1));
    let err = Reclaimer::spawn(store, Duration::ZERO).unwrap_err();
    assert_eq!(err.code(), "E006");
}

#[test]
fn test_spawn_requires_runtime() {
    let (store, _) = store_with_ttl(TimeDelta::hours(1));
    let err = Reclaimer::spawn(store, Duration::from_secs(1)).unwrap_err();
    assert_eq!(err.code(), "E007");
}
