//! In-memory key-value backend for tests and embedding.

use crate::storage::{KeyValueStore, PersistenceResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// HashMap-backed store. Values are cloned on read and write, so callers
/// never observe shared mutable state.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` when no key has been written yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.read().expect("lock poisoned").get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
