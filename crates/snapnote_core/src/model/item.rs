//! Gallery item domain model.
//!
//! # Responsibility
//! - Define the persisted photo record shared by all core layers.
//! - Provide construction helpers that keep hashtag casing normalized.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `hashtags` entries are lowercase; derivation from the caption is the
//!   caller's job (see `search::query::extract_hashtags`).
//! - `updated_at` is never earlier than `created_at`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One photo record with caption, hashtags and ownership metadata.
///
/// Field names are serialized in the external schema's camelCase form; the
/// persisted JSON must stay readable by pre-existing gallery data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Stable identifier, unique across all users' items.
    pub id: String,
    /// Owning user. The store does not check that the user exists.
    pub user_id: String,
    /// Reference to the image resource; opaque to the core.
    pub image_uri: String,
    /// Free caption text, source of truth for hashtags.
    pub caption: String,
    /// Lowercase `#`-prefixed tags derived from the caption at write time.
    pub hashtags: Vec<String>,
    /// ISO 8601 creation time, set once and never changed.
    pub created_at: String,
    /// ISO 8601 time of the latest update. Stamped by the store on update.
    pub updated_at: String,
}

impl GalleryItem {
    /// Creates an item with a generated stable ID.
    ///
    /// Both timestamps start at `timestamp`; hashtags are normalized to
    /// lowercase.
    pub fn new(
        user_id: impl Into<String>,
        image_uri: impl Into<String>,
        caption: impl Into<String>,
        hashtags: Vec<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            user_id,
            image_uri,
            caption,
            hashtags,
            timestamp,
        )
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used where identity already exists externally (imports, replays).
    /// The store never checks `id` uniqueness; that contract stays with
    /// the caller.
    pub fn with_id(
        id: impl Into<String>,
        user_id: impl Into<String>,
        image_uri: impl Into<String>,
        caption: impl Into<String>,
        hashtags: Vec<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            image_uri: image_uri.into(),
            caption: caption.into(),
            hashtags: hashtags.into_iter().map(|tag| tag.to_lowercase()).collect(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Returns whether this item belongs to the given user.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
