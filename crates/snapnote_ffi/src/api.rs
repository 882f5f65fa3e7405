//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level gallery functions to Dart via FRB.
//! - Keep error semantics simple for UI integration: envelopes, not
//!   exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Gallery functions share one process-wide store so writes stay
//!   serialized.
//! - Hashtags are re-derived from the caption on every add/update path.

use log::warn;
use snapnote_core::{
    core_version as core_version_inner, extract_hashtags, init_logging as init_logging_inner,
    ping as ping_inner, popular_hashtags, search_items, Clock, FileKeyValueStore, GalleryItem,
    GalleryStore, SystemClock,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const POPULAR_DEFAULT_LIMIT: u32 = 10;
const POPULAR_LIMIT_MAX: u32 = 50;
const DATA_DIR_ENV: &str = "SNAPNOTE_DATA_DIR";
const DATA_DIR_FALLBACK: &str = "snapnote_gallery";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static GALLERY: OnceLock<GalleryStore<FileKeyValueStore>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for identical `level + log_dir`; conflicting
///   reconfiguration returns an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Extracts hashtags from caption text for live input preview.
///
/// # FFI contract
/// - Sync call, pure; safe on every keystroke.
/// - Returns lowercase `#`-prefixed tokens in order of appearance.
#[flutter_rust_bridge::frb(sync)]
pub fn caption_hashtags(caption: String) -> Vec<String> {
    extract_hashtags(caption.as_str())
}

/// Gallery item snapshot crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItemView {
    pub id: String,
    pub user_id: String,
    pub image_uri: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// List response envelope for gallery read flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryListResponse {
    /// Items, newest-first (empty when the gallery holds none).
    pub items: Vec<GalleryItemView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for gallery command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected item on success.
    pub item_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl GalleryActionResponse {
    fn success(message: impl Into<String>, item_id: String) -> Self {
        Self {
            ok: true,
            item_id: Some(item_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Lists gallery items, optionally scoped to one user.
///
/// # FFI contract
/// - Async call, storage-backed.
/// - Never panics; a broken backend reads as an empty gallery.
pub async fn gallery_list(user_id: Option<String>) -> GalleryListResponse {
    let items = load_scoped(user_id.as_deref()).await;
    let message = format!("Loaded {} item(s).", items.len());
    GalleryListResponse {
        items: items.into_iter().map(to_view).collect(),
        message,
    }
}

/// Adds a photo with a caption; id, timestamps and hashtags are derived
/// here so the shell never persists stale tag data.
///
/// # FFI contract
/// - Async call, storage-backed.
/// - Never panics; returns the created item id on success.
pub async fn gallery_add(
    user_id: String,
    image_uri: String,
    caption: String,
) -> GalleryActionResponse {
    let caption = caption.trim().to_string();
    let item = GalleryItem::new(
        user_id,
        image_uri,
        caption.clone(),
        extract_hashtags(&caption),
        SystemClock.now_iso(),
    );
    let item_id = item.id.clone();

    match gallery_store().add_item(item).await {
        Ok(_) => GalleryActionResponse::success("Photo added.", item_id),
        Err(err) => {
            warn!("event=ffi_gallery_add module=ffi status=error error={err}");
            GalleryActionResponse::failure(format!("gallery_add failed: {err}"))
        }
    }
}

/// Replaces an item's caption, re-deriving its hashtags.
///
/// # FFI contract
/// - Async call, storage-backed.
/// - Returns a failure envelope when the id is unknown.
pub async fn gallery_update_caption(id: String, caption: String) -> GalleryActionResponse {
    let store = gallery_store();
    let Some(existing) = store
        .list_items()
        .await
        .into_iter()
        .find(|item| item.id == id)
    else {
        return GalleryActionResponse::failure(format!(
            "gallery_update_caption failed: item `{id}` not found"
        ));
    };

    let caption = caption.trim().to_string();
    let updated = GalleryItem {
        hashtags: extract_hashtags(&caption),
        caption,
        ..existing
    };

    match store.update_item(updated).await {
        Ok(_) => GalleryActionResponse::success("Caption updated.", id),
        Err(err) => {
            warn!("event=ffi_gallery_update module=ffi status=error error={err}");
            GalleryActionResponse::failure(format!("gallery_update_caption failed: {err}"))
        }
    }
}

/// Deletes an item by id. Deleting an unknown id succeeds (no-op).
///
/// # FFI contract
/// - Async call, storage-backed.
/// - Never panics.
pub async fn gallery_delete(id: String) -> GalleryActionResponse {
    match gallery_store().delete_item(&id).await {
        Ok(_) => GalleryActionResponse::success("Photo deleted.", id),
        Err(err) => {
            warn!("event=ffi_gallery_delete module=ffi status=error error={err}");
            GalleryActionResponse::failure(format!("gallery_delete failed: {err}"))
        }
    }
}

/// Searches captions and hashtags, optionally scoped to one user.
///
/// # FFI contract
/// - Async call, storage-backed; the match itself is in-memory.
/// - Blank queries return the full (scoped) gallery.
pub async fn gallery_search(query: String, user_id: Option<String>) -> GalleryListResponse {
    let items = load_scoped(user_id.as_deref()).await;
    let hits = search_items(&items, query.as_str());
    let message = if hits.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} result(s).", hits.len())
    };
    GalleryListResponse {
        items: hits.into_iter().map(to_view).collect(),
        message,
    }
}

/// Ranks hashtags by usage, optionally scoped to one user.
///
/// # FFI contract
/// - Async call, storage-backed.
/// - `limit` is normalized: `None`/`0` use the default, large values are
///   clamped.
pub async fn gallery_popular_hashtags(
    limit: Option<u32>,
    user_id: Option<String>,
) -> Vec<String> {
    let items = load_scoped(user_id.as_deref()).await;
    popular_hashtags(&items, normalize_popular_limit(limit) as usize)
}

async fn load_scoped(user_id: Option<&str>) -> Vec<GalleryItem> {
    match user_id {
        Some(user_id) => gallery_store().list_items_for_user(user_id).await,
        None => gallery_store().list_items().await,
    }
}

fn normalize_popular_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => POPULAR_DEFAULT_LIMIT,
        Some(value) if value > POPULAR_LIMIT_MAX => POPULAR_LIMIT_MAX,
        Some(value) => value,
        None => POPULAR_DEFAULT_LIMIT,
    }
}

fn resolve_data_dir() -> PathBuf {
    DATA_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DATA_DIR_FALLBACK)
        })
        .clone()
}

fn gallery_store() -> &'static GalleryStore<FileKeyValueStore> {
    GALLERY.get_or_init(|| GalleryStore::new(FileKeyValueStore::new(resolve_data_dir())))
}

fn to_view(item: GalleryItem) -> GalleryItemView {
    GalleryItemView {
        id: item.id,
        user_id: item.user_id,
        image_uri: item.image_uri,
        caption: item.caption,
        hashtags: item.hashtags,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}
