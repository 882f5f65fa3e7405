//! Domain model for gallery records.
//!
//! # Responsibility
//! - Define the canonical data structure persisted by the gallery store.
//! - Keep one item-centric shape shared by store, search and FFI layers.
//!
//! # Invariants
//! - Every gallery record is identified by a stable, caller-owned `id`.
//! - Deletion is a hard delete; the model carries no tombstone state.

pub mod item;
