use async_trait::async_trait;
use snapnote_core::{
    extract_hashtags, Clock, GalleryItem, GalleryStore, KeyValueStore, MemoryKeyValueStore,
    PersistenceError, PersistenceResult, GALLERY_ITEMS_KEY,
};
use std::sync::Arc;

const T0: &str = "2026-01-01T00:00:00.000Z";
const T1: &str = "2026-01-02T12:30:00.000Z";

struct FixedClock(&'static str);

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.to_string()
    }
}

fn sample_item(id: &str, user_id: &str, caption: &str) -> GalleryItem {
    GalleryItem::with_id(
        id,
        user_id,
        format!("file:///photos/{id}.jpg"),
        caption,
        extract_hashtags(caption),
        T0,
    )
}

fn fixed_store(storage: MemoryKeyValueStore) -> GalleryStore<MemoryKeyValueStore, FixedClock> {
    GalleryStore::with_clock(storage, FixedClock(T1))
}

#[tokio::test]
async fn list_on_fresh_store_is_empty_and_never_fails() {
    let store = fixed_store(MemoryKeyValueStore::new());
    assert!(store.list_items().await.is_empty());
}

#[tokio::test]
async fn add_items_returns_newest_first() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("1", "u1", "first")).await.unwrap();
    store.add_item(sample_item("2", "u1", "second")).await.unwrap();
    let returned = store.add_item(sample_item("3", "u1", "third")).await.unwrap();

    let ids: Vec<&str> = returned.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
    assert_eq!(store.list_items().await, returned);
}

#[tokio::test]
async fn add_does_not_reject_duplicate_ids() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("dup", "u1", "one")).await.unwrap();
    let items = store.add_item(sample_item("dup", "u1", "two")).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.id == "dup"));
}

#[tokio::test]
async fn delete_removes_item_and_is_idempotent() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("1", "u1", "keep")).await.unwrap();
    store.add_item(sample_item("2", "u1", "drop")).await.unwrap();

    let after_delete = store.delete_item("2").await.unwrap();
    assert_eq!(after_delete.len(), 1);
    assert!(after_delete.iter().all(|item| item.id != "2"));

    let after_repeat = store.delete_item("2").await.unwrap();
    assert_eq!(after_repeat, after_delete);

    let after_absent = store.delete_item("never-existed").await.unwrap();
    assert_eq!(after_absent, after_delete);
}

#[tokio::test]
async fn update_stamps_updated_at_and_preserves_created_at() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("1", "u1", "old caption")).await.unwrap();
    store.add_item(sample_item("2", "u1", "untouched")).await.unwrap();

    let mut changed = sample_item("1", "u1", "new caption #fresh");
    changed.hashtags = extract_hashtags(&changed.caption);
    // A caller-supplied created_at must not override the stored one.
    changed.created_at = "1999-01-01T00:00:00.000Z".to_string();

    let items = store.update_item(changed).await.unwrap();
    let updated = items.iter().find(|item| item.id == "1").unwrap();
    assert_eq!(updated.caption, "new caption #fresh");
    assert_eq!(updated.hashtags, vec!["#fresh"]);
    assert_eq!(updated.created_at, T0);
    assert_eq!(updated.updated_at, T1);

    let untouched = items.iter().find(|item| item.id == "2").unwrap();
    assert_eq!(*untouched, sample_item("2", "u1", "untouched"));
}

#[tokio::test]
async fn update_with_unknown_id_is_a_silent_no_op() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("1", "u1", "only")).await.unwrap();

    let before = store.list_items().await;
    let after = store.update_item(sample_item("ghost", "u1", "nope")).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn save_then_list_round_trips_content_and_order() {
    let store = fixed_store(MemoryKeyValueStore::new());
    let items = vec![
        sample_item("a", "u1", "one #x"),
        sample_item("b", "u2", "two #y"),
        sample_item("c", "u1", "three"),
    ];
    store.save_items(&items).await.unwrap();
    assert_eq!(store.list_items().await, items);
}

#[tokio::test]
async fn list_for_user_scopes_to_owner() {
    let store = fixed_store(MemoryKeyValueStore::new());
    store.add_item(sample_item("1", "alice", "hers")).await.unwrap();
    store.add_item(sample_item("2", "bob", "his")).await.unwrap();
    store.add_item(sample_item("3", "alice", "also hers")).await.unwrap();

    let alice = store.list_items_for_user("alice").await;
    assert_eq!(
        alice.iter().map(|item| item.id.as_str()).collect::<Vec<_>>(),
        vec!["3", "1"]
    );
    assert!(store.list_items_for_user("carol").await.is_empty());
}

#[tokio::test]
async fn undecodable_persisted_payload_reads_as_empty() {
    let storage = MemoryKeyValueStore::new();
    storage.set(GALLERY_ITEMS_KEY, "{definitely not json").await.unwrap();

    let store = fixed_store(storage);
    assert!(store.list_items().await.is_empty());
}

struct FailingWrites;

#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, _key: &str) -> PersistenceResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> PersistenceResult<()> {
        Err(PersistenceError::Io(std::io::Error::other("disk full")))
    }
}

#[tokio::test]
async fn write_failure_propagates_from_mutating_operations() {
    let store = GalleryStore::with_clock(FailingWrites, FixedClock(T1));

    let err = store
        .add_item(sample_item("1", "u1", "doomed"))
        .await
        .expect_err("add should surface the write failure");
    assert!(matches!(err, PersistenceError::Io(_)));

    let err = store.save_items(&[]).await.expect_err("save should fail");
    assert!(err.to_string().contains("storage i/o failed"));

    // Reads stay infallible even over a broken backend.
    assert!(store.list_items().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_adds_do_not_lose_updates() {
    let store = Arc::new(GalleryStore::new(MemoryKeyValueStore::new()));

    let mut handles = Vec::new();
    for n in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .add_item(sample_item(&format!("id-{n}"), "u1", "race"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list_items().await.len(), 8);
}
