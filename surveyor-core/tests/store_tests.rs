// Tests for the in-memory crawl result store

use surveyor_core::store::ResultStore;
use surveyor_crawler::{CrawlOutcome, PageRecord};

fn outcome(urls: &[&str]) -> CrawlOutcome {
    CrawlOutcome::completed(
        urls.iter()
            .map(|u| PageRecord::new(u.to_string()))
            .collect(),
    )
}

#[test]
fn test_new_store_is_empty() {
    let store = ResultStore::new();
    assert!(store.is_empty());
    assert!(store.get().is_none());
}

#[test]
fn test_set_then_get() {
    let mut store = ResultStore::new();
    store.set(outcome(&["https://example.com/"]));

    assert!(!store.is_empty());
    let held = store.get().expect("stored outcome");
    assert_eq!(held.records.len(), 1);
    assert_eq!(held.records[0].url, "https://example.com/");
}

#[test]
fn test_set_replaces_previous_outcome() {
    let mut store = ResultStore::new();
    store.set(outcome(&["https://example.com/a"]));
    store.set(outcome(&["https://example.com/b", "https://example.com/c"]));

    assert_eq!(store.get().expect("stored outcome").records.len(), 2);
}

#[test]
fn test_take_empties_the_store() {
    let mut store = ResultStore::new();
    store.set(outcome(&["https://example.com/"]));

    let taken = store.take().expect("stored outcome");
    assert_eq!(taken.records.len(), 1);
    assert!(store.is_empty());
    assert!(store.take().is_none());
}
