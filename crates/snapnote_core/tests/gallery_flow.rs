//! End-to-end flows combining store persistence with the pure search and
//! aggregation helpers, the way the app shell drives them.

use snapnote_core::{
    extract_hashtags, filter_by_hashtag, popular_hashtags, search_items, GalleryItem,
    GalleryStore, MemoryKeyValueStore,
};

fn captioned(id: &str, user_id: &str, caption: &str) -> GalleryItem {
    GalleryItem::with_id(
        id,
        user_id,
        format!("file:///photos/{id}.jpg"),
        caption,
        extract_hashtags(caption),
        "2026-01-01T00:00:00.000Z",
    )
}

#[tokio::test]
async fn captured_photos_are_searchable_by_caption_and_tag() {
    let store = GalleryStore::new(MemoryKeyValueStore::new());
    store
        .add_item(captioned("1", "u1", "Nice #Sunset view"))
        .await
        .unwrap();
    store
        .add_item(captioned("2", "u1", "City #night walk"))
        .await
        .unwrap();

    let snapshot = store.list_items_for_user("u1").await;

    let by_caption = search_items(&snapshot, "SUNSET");
    assert_eq!(by_caption.len(), 1);
    assert_eq!(by_caption[0].id, "1");

    let by_tag = filter_by_hashtag(&snapshot, "#NIGHT");
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, "2");
}

#[tokio::test]
async fn popular_tags_reflect_whole_gallery_after_updates() {
    let store = GalleryStore::new(MemoryKeyValueStore::new());
    store
        .add_item(captioned("1", "u1", "#beach #beach #sun"))
        .await
        .unwrap();
    store.add_item(captioned("2", "u2", "#sun")).await.unwrap();

    // Re-captioning drops the item's old tags from the ranking.
    let recaptioned = captioned("2", "u2", "#beach day");
    let items = store.update_item(recaptioned).await.unwrap();

    assert_eq!(popular_hashtags(&items, 10), vec!["#beach", "#sun"]);
}
