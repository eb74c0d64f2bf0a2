//! Query/reporting tests: listings, search, rankings, aggregate stats

use chrono::TimeDelta;
use tinylink::identity::UserRegistry;
use tinylink::storage::{LinkStore, StoreOptions};

struct Fixture {
    store: LinkStore,
    alice: String,
    bob: String,
}

fn fixture() -> Fixture {
    let users = UserRegistry::new();
    let alice = users.create_user("Alice").id;
    let bob = users.create_user("Bob").id;
    Fixture {
        store: LinkStore::new(users, StoreOptions::default()),
        alice,
        bob,
    }
}

fn resolve_n(store: &LinkStore, code: &str, n: usize) {
    for _ in 0..n {
        store.resolve(code).unwrap();
    }
}

#[test]
fn test_list_by_owner_newest_first() {
    let f = fixture();
    let first = f.store.create("https://one.com", &f.alice, None).unwrap();
    let _bob = f.store.create("https://bob.com", &f.bob, None).unwrap();
    let second = f.store.create("https://two.com", &f.alice, None).unwrap();
    let third = f.store.create("https://three.com", &f.alice, None).unwrap();

    let codes: Vec<String> = f
        .store
        .list_by_owner(&f.alice)
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(codes, vec![third, second, first]);

    assert_eq!(f.store.list_by_owner(&f.bob).len(), 1);
    assert!(f.store.list_by_owner("nobody").is_empty());
}

#[test]
fn test_search_matches_url_or_code_case_insensitively() {
    let f = fixture();
    let google = f
        .store
        .create("https://Google.com/search", &f.alice, None)
        .unwrap();
    let example = f.store.create("https://example.com/test", &f.alice, None).unwrap();
    f.store.create("https://google.com/other", &f.bob, None).unwrap();

    let results = f.store.search("GOOGLE", &f.alice);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code, google);

    let results = f.store.search("example", &f.alice);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code, example);

    let by_code = f.store.search(&example.to_uppercase(), &f.alice);
    assert!(by_code.iter().any(|l| l.code == example));

    assert!(f.store.search("nothing-like-this", &f.alice).is_empty());
}

#[test]
fn test_empty_query_lists_all_owned() {
    let f = fixture();
    let a = f.store.create("https://a.com", &f.alice, None).unwrap();
    let b = f.store.create("https://b.com", &f.alice, None).unwrap();
    f.store.create("https://c.com", &f.bob, None).unwrap();

    let codes: Vec<String> = f.store.search("", &f.alice).into_iter().map(|l| l.code).collect();
    assert_eq!(codes, vec![b, a]);
}

#[test]
fn test_top_by_access_count() {
    let f = fixture();
    let low = f.store.create("https://low.com", &f.alice, None).unwrap();
    let high = f.store.create("https://high.com", &f.bob, None).unwrap();
    let mid_old = f.store.create("https://mid-old.com", &f.alice, None).unwrap();
    let mid_new = f.store.create("https://mid-new.com", &f.alice, None).unwrap();

    resolve_n(&f.store, &low, 1);
    resolve_n(&f.store, &high, 5);
    resolve_n(&f.store, &mid_old, 3);
    resolve_n(&f.store, &mid_new, 3);

    let top: Vec<String> = f
        .store
        .top_by_access_count(3)
        .into_iter()
        .map(|l| l.code)
        .collect();
    // Ties go to the more recent link
    assert_eq!(top, vec![high, mid_new, mid_old]);

    assert_eq!(f.store.top_by_access_count(100).len(), 4);
    assert!(f.store.top_by_access_count(0).is_empty());
}

#[test]
fn test_most_recent_clamps() {
    let f = fixture();
    let codes: Vec<String> = (0..5)
        .map(|i| {
            f.store
                .create(&format!("https://site{}.com", i), &f.alice, None)
                .unwrap()
        })
        .collect();

    let recent: Vec<String> = f.store.most_recent(2).into_iter().map(|l| l.code).collect();
    assert_eq!(recent, vec![codes[4].clone(), codes[3].clone()]);

    assert_eq!(f.store.most_recent(50).len(), 5);
    assert_eq!(f.store.all_links().len(), 5);
    assert_eq!(f.store.all_links()[0].code, codes[4]);
}

#[test]
fn test_stats_on_empty_store() {
    let f = fixture();
    let stats = f.store.stats();

    assert_eq!(stats.total_links, 0);
    assert_eq!(stats.active_links, 0);
    assert_eq!(stats.total_accesses, 0);
    assert_eq!(stats.average_accesses, 0.0);
    assert!(stats.most_popular.is_none());
}

#[test]
fn test_stats_aggregates() {
    let f = fixture();
    let popular = f.store.create("https://popular.com", &f.alice, None).unwrap();
    let limited = f.store.create("https://limited.com", &f.bob, Some(1)).unwrap();
    f.store.create("https://quiet.com", &f.alice, None).unwrap();
    f.store.create("https://quieter.com", &f.alice, None).unwrap();

    resolve_n(&f.store, &popular, 5);
    resolve_n(&f.store, &limited, 1);

    let stats = f.store.stats();
    assert_eq!(stats.total_links, 4);
    assert_eq!(stats.active_links, 3);
    assert_eq!(stats.total_accesses, 6);
    assert!((stats.average_accesses - 1.5).abs() < f64::EPSILON);
    assert_eq!(stats.most_popular.unwrap().code, popular);
    assert_eq!(stats.total_users, 0);
}

#[test]
fn test_stats_without_accesses_has_no_most_popular() {
    let f = fixture();
    f.store.create("https://a.com", &f.alice, None).unwrap();
    assert!(f.store.stats().most_popular.is_none());
}

#[test]
fn test_stats_counts_expired_as_inactive() {
    let users = UserRegistry::new();
    let owner = users.create_user("Owner").id;
    let store = LinkStore::new(users, StoreOptions::default().with_ttl(TimeDelta::zero()));
    store.create("https://gone.com", &owner, None).unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_links, 1);
    assert_eq!(stats.active_links, 0);
}
