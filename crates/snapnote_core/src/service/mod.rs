//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate persistence collaborators into gallery-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod gallery;
