//! Flutter-facing bindings for the Snapnote gallery core.
//!
//! Generated bridge glue lives outside the repo; this crate only carries
//! the stable API surface consumed by the code generator.

pub mod api;
