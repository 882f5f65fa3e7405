//! Gallery store: CRUD over the persisted item collection.
//!
//! # Responsibility
//! - Own durability of the single gallery blob (key `galleryItems`).
//! - Provide async CRUD plus user-scoped listing for embedders.
//!
//! # Invariants
//! - The persisted collection is ordered newest-first; `add_item`
//!   prepends.
//! - Every mutating operation is exactly one read-modify-write cycle over
//!   the whole blob, serialized through a per-store write gate so
//!   overlapping writers cannot lose each other's changes.
//! - Missing or undecodable persisted data reads as the empty collection;
//!   only write failures surface to callers.
//! - `created_at` of a stored entry survives updates; `updated_at` is
//!   stamped from the injected clock.

use crate::clock::{Clock, SystemClock};
use crate::model::item::GalleryItem;
use crate::storage::{KeyValueStore, PersistenceError, PersistenceResult};
use log::warn;
use tokio::sync::Mutex;

/// Fixed storage key of the whole item collection. Part of the
/// compatibility surface with pre-existing persisted gallery data.
pub const GALLERY_ITEMS_KEY: &str = "galleryItems";

/// Async gallery store over an injected key-value collaborator.
///
/// Callers own the collections returned from each operation; they are
/// fresh snapshots, never live references to store-internal state.
pub struct GalleryStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    write_gate: Mutex<()>,
}

impl<S: KeyValueStore> GalleryStore<S> {
    /// Creates a store over `storage` using the system clock.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> GalleryStore<S, C> {
    /// Creates a store with an explicit clock. Used by tests to make
    /// update stamping deterministic.
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            write_gate: Mutex::new(()),
        }
    }

    /// Loads the full collection, newest-first.
    ///
    /// Never fails: a missing key, an unreadable backend or an
    /// undecodable payload all degrade to the empty collection. The
    /// gallery is not safety-critical data; availability wins here.
    pub async fn list_items(&self) -> Vec<GalleryItem> {
        self.load().await
    }

    /// Loads the collection scoped to one user, newest-first.
    pub async fn list_items_for_user(&self, user_id: &str) -> Vec<GalleryItem> {
        self.load()
            .await
            .into_iter()
            .filter(|item| item.is_owned_by(user_id))
            .collect()
    }

    /// Replaces the whole persisted collection with `items`.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when encoding or the backend write
    /// fails; the in-memory state is not durable until this resolves.
    pub async fn save_items(&self, items: &[GalleryItem]) -> PersistenceResult<()> {
        let _gate = self.write_gate.lock().await;
        self.persist(items).await
    }

    /// Prepends `item` and persists, returning the new full collection.
    ///
    /// `id` uniqueness is the caller's contract; a duplicate id silently
    /// creates a second entry.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the write fails.
    pub async fn add_item(&self, item: GalleryItem) -> PersistenceResult<Vec<GalleryItem>> {
        let _gate = self.write_gate.lock().await;
        let mut items = self.load().await;
        items.insert(0, item);
        self.persist(&items).await?;
        Ok(items)
    }

    /// Removes every entry with the given id and persists.
    ///
    /// Deleting an absent id is a no-op success returning the unchanged
    /// collection.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the write fails.
    pub async fn delete_item(&self, id: &str) -> PersistenceResult<Vec<GalleryItem>> {
        let _gate = self.write_gate.lock().await;
        let mut items = self.load().await;
        items.retain(|item| item.id != id);
        self.persist(&items).await?;
        Ok(items)
    }

    /// Replaces the entry whose id matches `updated`, stamping
    /// `updated_at` from the clock and keeping the stored `created_at`.
    ///
    /// All other entries are untouched. When no entry matches, the
    /// collection is persisted unchanged (silent no-op).
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the write fails.
    pub async fn update_item(&self, updated: GalleryItem) -> PersistenceResult<Vec<GalleryItem>> {
        let _gate = self.write_gate.lock().await;
        let mut items = self.load().await;
        let stamp = self.clock.now_iso();
        for entry in items.iter_mut() {
            if entry.id == updated.id {
                let created_at = entry.created_at.clone();
                *entry = GalleryItem {
                    created_at,
                    updated_at: stamp.clone(),
                    ..updated.clone()
                };
            }
        }
        self.persist(&items).await?;
        Ok(items)
    }

    async fn load(&self) -> Vec<GalleryItem> {
        let raw = match self.storage.get(GALLERY_ITEMS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=gallery_load module=service status=degraded error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!("event=gallery_decode module=service status=degraded error={err}");
                Vec::new()
            }
        }
    }

    async fn persist(&self, items: &[GalleryItem]) -> PersistenceResult<()> {
        let payload = serde_json::to_string(items).map_err(PersistenceError::Encode)?;
        self.storage.set(GALLERY_ITEMS_KEY, &payload).await
    }
}
