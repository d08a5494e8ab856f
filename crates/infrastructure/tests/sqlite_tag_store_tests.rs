//! Integration tests for SqliteTagStore
//!
//! These run against an in-memory SQLite database, so no external
//! setup is required.

use domain::{Tag, TagStore};
use infrastructure::SqliteTagStore;

async fn create_test_store() -> SqliteTagStore {
    SqliteTagStore::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory tag store")
}

fn sample_tags() -> Vec<Tag> {
    vec![
        Tag::new(1, "produce", "#00ff00"),
        Tag::new(2, "dairy", "#0000ff"),
        Tag::new(3, "bakery", "#ffaa00"),
    ]
}

#[tokio::test]
async fn save_then_get_returns_full_collection() {
    let store = create_test_store().await;

    store.save_tags(&sample_tags()).await.unwrap();
    let mut tags = store.get_tags().await.unwrap();
    tags.sort();

    assert_eq!(tags.len(), 3);
    assert_eq!(tags[0].label, "bakery");
    assert_eq!(tags[1].label, "dairy");
    assert_eq!(tags[2].label, "produce");
}

#[tokio::test]
async fn empty_table_is_success_with_empty_collection() {
    let store = create_test_store().await;

    let tags = store.get_tags().await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn save_ignores_conflicting_ids() {
    let store = create_test_store().await;

    store
        .save_tags(&[Tag::new(1, "original", "#111111")])
        .await
        .unwrap();
    store
        .save_tags(&[Tag::new(1, "replacement", "#222222")])
        .await
        .unwrap();

    let tags = store.get_tags().await.unwrap();
    assert_eq!(tags.len(), 1);
    // Pre-existing rows win under ignore-on-conflict
    assert_eq!(tags[0].label, "original");
    assert_eq!(tags[0].color, "#111111");
}

#[tokio::test]
async fn save_of_empty_collection_is_a_valid_noop() {
    let store = create_test_store().await;

    store.save_tags(&[]).await.unwrap();
    assert!(store.get_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn color_strings_round_trip_verbatim() {
    let store = create_test_store().await;

    store
        .save_tags(&[Tag::new(9, "odd", "ff0000"), Tag::new(10, "bad", "nope")])
        .await
        .unwrap();

    let mut tags = store.get_tags().await.unwrap();
    tags.sort_by_key(|t| t.id);

    assert_eq!(tags[0].color, "ff0000");
    assert_eq!(tags[1].color, "nope");
}
