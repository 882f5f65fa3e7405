//! Core domain logic for Snapnote.
//! This crate is the single source of truth for gallery business
//! invariants; the mobile shell and FFI layer stay storage-agnostic.

pub mod clock;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::GalleryItem;
pub use search::query::{extract_hashtags, filter_by_hashtag, popular_hashtags, search_items};
pub use service::gallery::{GalleryStore, GALLERY_ITEMS_KEY};
pub use storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistenceError, PersistenceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
