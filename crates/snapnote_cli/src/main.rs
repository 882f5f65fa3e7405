//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `snapnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use snapnote_core::{
    extract_hashtags, search_items, GalleryItem, GalleryStore, MemoryKeyValueStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("snapnote_core ping={}", snapnote_core::ping());
    println!("snapnote_core version={}", snapnote_core::core_version());

    // One in-memory add/list/search round over the real store path,
    // without touching the file system.
    let store = GalleryStore::new(MemoryKeyValueStore::new());
    let caption = "smoke round #smoke";
    let item = GalleryItem::with_id(
        "smoke-1",
        "smoke-user",
        "file:///dev/null.jpg",
        caption,
        extract_hashtags(caption),
        "2026-01-01T00:00:00.000Z",
    );

    match store.add_item(item).await {
        Ok(items) => {
            let hits = search_items(&items, "#smoke");
            println!("gallery items={} hits={}", items.len(), hits.len());
        }
        Err(err) => println!("gallery error={err}"),
    }
}
