//! Timestamp collaborator for update stamping.
//!
//! # Responsibility
//! - Provide the ISO 8601 timestamps recorded on gallery items.
//! - Keep time injectable so stamping behavior stays testable.

use chrono::{SecondsFormat, Utc};

/// Source of ISO 8601 timestamps consumed by the gallery store.
pub trait Clock: Send + Sync {
    /// Current instant as an ISO 8601 UTC string.
    fn now_iso(&self) -> String;
}

/// Wall-clock implementation used by production embedders.
///
/// Millisecond precision with a `Z` suffix, matching the format already
/// present in persisted gallery data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, SystemClock};

    #[test]
    fn system_clock_emits_utc_millis_format() {
        let stamp = SystemClock.now_iso();
        assert!(stamp.ends_with('Z'), "expected Z suffix in `{stamp}`");
        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(stamp.len(), 24, "unexpected stamp shape `{stamp}`");
    }
}
