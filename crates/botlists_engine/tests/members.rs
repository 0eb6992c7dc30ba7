use std::fs;
use std::sync::Arc;

use botlists_core::ListId;
use botlists_engine::{ApiError, DiskStore, MembersError, MemoizedMembers, StoreError};
use serde_json::json;
use tempfile::TempDir;

mod support;
use support::{account, members, FakeApi};

#[tokio::test]
async fn miss_calls_api_once_and_hit_serves_from_disk() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let api = Arc::new(FakeApi::new().with_list(
        "a/lists/b",
        members(vec![account("one", ""), account("two", "")]),
    ));
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    let fetcher = MemoizedMembers::new(api.clone(), store);
    let list = ListId::new("a", "b");

    let first = fetcher.fetch_members(&list).await.unwrap();
    let second = fetcher.fetch_members(&list).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.users.len(), 2);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].count, 5000);
    assert!(calls[0].skip_status);
}

#[tokio::test]
async fn cache_persists_across_runs() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let list = ListId::new("a", "b");

    let api = Arc::new(FakeApi::new().with_list("a/lists/b", members(vec![account("one", "")])));
    let fetcher = MemoizedMembers::new(api, Arc::new(DiskStore::open(temp.path()).unwrap()));
    fetcher.fetch_members(&list).await.unwrap();
    fetcher.close().unwrap();

    let offline = Arc::new(FakeApi::new());
    let fetcher =
        MemoizedMembers::new(offline.clone(), Arc::new(DiskStore::open(temp.path()).unwrap()));
    let cached = fetcher.fetch_members(&list).await.unwrap();
    assert_eq!(cached.users[0].screen_name, "one");
    assert!(offline.calls().is_empty());
}

#[tokio::test]
async fn failures_propagate_and_are_not_cached() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let failure = ApiError::Network("connection reset".to_string());
    let api = Arc::new(FakeApi::new().with_failure("a/lists/b", failure.clone()));
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    let fetcher = MemoizedMembers::new(api.clone(), store);
    let list = ListId::new("a", "b");

    for _ in 0..2 {
        match fetcher.fetch_members(&list).await {
            Err(MembersError::Api(err)) => assert_eq!(err, failure),
            other => panic!("expected api error, got {other:?}"),
        }
    }
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn corrupt_entry_is_refetched_and_overwritten() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    store.put("a/lists/b", "not json at all").unwrap();

    let api = Arc::new(FakeApi::new().with_list("a/lists/b", members(vec![account("fresh", "")])));
    let fetcher = MemoizedMembers::new(api.clone(), store.clone());
    let list = ListId::new("a", "b");

    let fetched = fetcher.fetch_members(&list).await.unwrap();
    assert_eq!(fetched.users[0].screen_name, "fresh");
    assert!(store.get("a/lists/b").unwrap().unwrap().contains("fresh"));

    fetcher.fetch_members(&list).await.unwrap();
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn unreadable_entry_file_counts_as_miss() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    store.put("a/lists/b", "{}").unwrap();
    for entry in fs::read_dir(temp.path()).unwrap() {
        fs::write(entry.unwrap().path(), "garbage").unwrap();
    }

    let api = Arc::new(FakeApi::new().with_list("a/lists/b", members(vec![])));
    let fetcher = MemoizedMembers::new(api.clone(), store);
    fetcher.fetch_members(&ListId::new("a", "b")).await.unwrap();
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn closed_store_fails_fetches() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let api = Arc::new(FakeApi::new().with_list("a/lists/b", members(vec![])));
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    let fetcher = MemoizedMembers::new(api.clone(), store);
    fetcher.close().unwrap();

    let err = fetcher.fetch_members(&ListId::new("a", "b")).await.unwrap_err();
    assert!(matches!(err, MembersError::Store(StoreError::Closed(_))));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn cache_keeps_the_body_as_received() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let body = json!({
        "users": [{"id_str": "7", "screen_name": "one", "verified": true}],
        "next_cursor_str": "0",
        "previous_cursor_str": "0",
        "next_cursor": 0
    });
    let api = Arc::new(FakeApi::new().with_raw_list("a/lists/b", body.clone()));
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    let fetcher = MemoizedMembers::new(api, store.clone());

    let fetched = fetcher.fetch_members(&ListId::new("a", "b")).await.unwrap();
    assert_eq!(fetched.users[0].screen_name, "one");

    let stored = store.get("a/lists/b").unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, body);
}

#[tokio::test]
async fn undecodable_body_is_a_parse_error_and_not_cached() {
    support::init_logging();
    let temp = TempDir::new().unwrap();
    let api = Arc::new(FakeApi::new().with_raw_list("a/lists/b", json!({"users": "nope"})));
    let store = Arc::new(DiskStore::open(temp.path()).unwrap());
    let fetcher = MemoizedMembers::new(api, store.clone());

    let err = fetcher.fetch_members(&ListId::new("a", "b")).await.unwrap_err();
    assert!(matches!(err, MembersError::Api(ApiError::Parse(_))));
    assert_eq!(store.get("a/lists/b").unwrap(), None);
}
