//! File-backed key-value store, one file per key.
//!
//! # Responsibility
//! - Persist each key as `<root>/<key>.json`.
//! - Keep writes crash-safe via write-to-temp-then-rename.
//!
//! # Invariants
//! - Keys must be plain file-name-safe tokens; the core only uses fixed
//!   constants and never derives keys from user input.
//! - A missing file reads as an absent key, not as an error.

use crate::storage::{KeyValueStore, PersistenceResult};
use async_trait::async_trait;
use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

/// Durable backend storing each key under a root directory.
///
/// The root is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`. No I/O happens until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding this store's entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json.tmp"))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let started_at = Instant::now();
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => {
                info!(
                    "event=kv_read module=storage status=ok key={key} bytes={} duration_ms={}",
                    value.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(value))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=kv_read module=storage status=absent key={key}");
                Ok(None)
            }
            Err(err) => {
                error!(
                    "event=kv_read module=storage status=error key={key} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err.into())
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let result = write_entry(self, key, value).await;
        match &result {
            Ok(()) => info!(
                "event=kv_write module=storage status=ok key={key} bytes={} duration_ms={}",
                value.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=kv_write module=storage status=error key={key} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

async fn write_entry(store: &FileKeyValueStore, key: &str, value: &str) -> PersistenceResult<()> {
    fs::create_dir_all(&store.root).await?;
    let temp = store.temp_path(key);
    fs::write(&temp, value).await?;
    fs::rename(&temp, store.entry_path(key)).await?;
    Ok(())
}
