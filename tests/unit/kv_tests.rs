//! Unit tests for the flat key-value store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mattermost_netlify::persistence::db;
use mattermost_netlify::persistence::kv::{KvKind, KvStore};

async fn store() -> KvStore {
    let pool = db::connect_memory().await.expect("db");
    KvStore::new(Arc::new(pool))
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let kv = store().await;
    assert_eq!(kv.get("nope").await.expect("get"), None);
}

#[tokio::test]
async fn set_then_get_returns_value() {
    let kv = store().await;
    kv.set(KvKind::Token, "u1_netlifyToken", b"sealed")
        .await
        .expect("set");
    assert_eq!(
        kv.get("u1_netlifyToken").await.expect("get"),
        Some(b"sealed".to_vec())
    );
}

#[tokio::test]
async fn set_overwrites_existing_value() {
    let kv = store().await;
    kv.set(KvKind::Subscription, "s_webhook", b"C1")
        .await
        .expect("set");
    kv.set(KvKind::Subscription, "s_webhook", b"C1 C2")
        .await
        .expect("overwrite");
    assert_eq!(
        kv.get("s_webhook").await.expect("get"),
        Some(b"C1 C2".to_vec())
    );
}

#[tokio::test]
async fn delete_reports_whether_a_row_existed() {
    let kv = store().await;
    kv.set(KvKind::OAuthState, "abc_u1", b"abc_u1")
        .await
        .expect("set");
    assert!(kv.delete("abc_u1").await.expect("delete"));
    assert!(!kv.delete("abc_u1").await.expect("second delete"));
    assert_eq!(kv.get("abc_u1").await.expect("get"), None);
}

#[tokio::test]
async fn purge_only_touches_the_given_kind() {
    let kv = store().await;
    kv.set(KvKind::OAuthState, "state_u1", b"state_u1")
        .await
        .expect("set state");
    kv.set(KvKind::Token, "u1_netlifyToken", b"sealed")
        .await
        .expect("set token");

    let removed = kv
        .purge_kind_before(KvKind::OAuthState, Utc::now() + Duration::seconds(5))
        .await
        .expect("purge");

    assert_eq!(removed, 1);
    assert_eq!(kv.get("state_u1").await.expect("get"), None);
    assert!(kv.get("u1_netlifyToken").await.expect("get").is_some());
}

#[tokio::test]
async fn purge_keeps_recent_rows() {
    let kv = store().await;
    kv.set(KvKind::OAuthState, "state_u1", b"state_u1")
        .await
        .expect("set");

    let removed = kv
        .purge_kind_before(KvKind::OAuthState, Utc::now() - Duration::seconds(60))
        .await
        .expect("purge");

    assert_eq!(removed, 0);
    assert!(kv.get("state_u1").await.expect("get").is_some());
}

#[tokio::test]
async fn on_disk_database_persists_between_connections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("kv.db");

    let first = Arc::new(db::connect(&path).await.expect("connect"));
    KvStore::new(Arc::clone(&first))
        .set(KvKind::Token, "u1_netlifyToken", b"sealed")
        .await
        .expect("set");
    first.close().await;

    let second = Arc::new(db::connect(&path).await.expect("reconnect"));
    let value = KvStore::new(second)
        .get("u1_netlifyToken")
        .await
        .expect("get");
    assert_eq!(value, Some(b"sealed".to_vec()));
}

#[tokio::test]
async fn append_member_builds_space_separated_list() {
    let kv = store().await;
    assert!(kv
        .append_member(KvKind::Subscription, "s_webhook", "A")
        .await
        .expect("first"));
    assert!(kv
        .append_member(KvKind::Subscription, "s_webhook", "B")
        .await
        .expect("second"));
    assert!(!kv
        .append_member(KvKind::Subscription, "s_webhook", "A")
        .await
        .expect("duplicate"));
    assert_eq!(
        kv.get("s_webhook").await.expect("get"),
        Some(b"A B".to_vec())
    );
}

#[tokio::test]
async fn get_kind_since_filters_kind_and_age() {
    let kv = store().await;
    kv.set(KvKind::OAuthState, "abc_u1", b"abc_u1")
        .await
        .expect("set");

    let hour_ago = Utc::now() - Duration::hours(1);
    assert_eq!(
        kv.get_kind_since(KvKind::OAuthState, "abc_u1", hour_ago)
            .await
            .expect("get"),
        Some(b"abc_u1".to_vec())
    );
    assert_eq!(
        kv.get_kind_since(KvKind::Token, "abc_u1", hour_ago)
            .await
            .expect("get"),
        None
    );
    let future = Utc::now() + Duration::hours(1);
    assert_eq!(
        kv.get_kind_since(KvKind::OAuthState, "abc_u1", future)
            .await
            .expect("get"),
        None
    );
}

#[tokio::test]
async fn delete_kind_ignores_other_kinds() {
    let kv = store().await;
    kv.set(KvKind::Token, "u1_netlifyToken", b"sealed")
        .await
        .expect("set");

    assert!(!kv
        .delete_kind(KvKind::OAuthState, "u1_netlifyToken")
        .await
        .expect("delete"));
    assert!(kv
        .delete_kind(KvKind::Token, "u1_netlifyToken")
        .await
        .expect("delete"));
}
