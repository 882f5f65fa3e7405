//! Key-value persistence contracts and backends.
//!
//! # Responsibility
//! - Define the storage collaborator consumed by the gallery store.
//! - Isolate backend I/O details from service orchestration.
//!
//! # Invariants
//! - A missing key reads as `Ok(None)`, never as an error.
//! - All I/O failures are propagated as [`PersistenceError`], never
//!   silently ignored at this layer.
//! - Backends never interpret stored values; they move opaque strings.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The single structured failure kind of the persistence boundary.
#[derive(Debug)]
pub enum PersistenceError {
    /// Read or write against the backing store failed.
    Io(std::io::Error),
    /// The gallery payload could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage i/o failed: {err}"),
            Self::Encode(err) => write!(f, "payload encoding failed: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Async key-value collaborator holding one serialized value per key.
///
/// The gallery store keeps its whole collection under a single fixed key;
/// other app concerns (auth, theme) use sibling keys through the same
/// mechanism and must not collide with it.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
}
