//! Caption search and hashtag analytics entry points.
//!
//! # Responsibility
//! - Expose pure, I/O-free query helpers over in-memory item collections.
//! - Keep hashtag token rules in one place for store, FFI and callers.

pub mod query;
