//! Pure search and hashtag functions over gallery collections.
//!
//! # Responsibility
//! - Filter and rank in-memory item collections without touching storage.
//! - Define the single hashtag token grammar used across the app.
//!
//! # Invariants
//! - Functions here never perform I/O and never fail.
//! - Result ordering is deterministic: input order for filters,
//!   count-then-first-encounter for aggregation.

use crate::model::item::GalleryItem;
use once_cell::sync::Lazy;
use regex::Regex;

/// Hashtag token: `#` followed by ASCII word characters or Hebrew-block
/// code points. Mirrors the grammar of already-persisted captions.
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9A-Za-z_\u{0590}-\u{05FF}]+").expect("valid hashtag regex"));

/// Filters items whose caption or any hashtag contains `query`,
/// case-insensitively.
///
/// A blank or whitespace-only query returns the input unchanged. Input
/// order is preserved; returned items are fresh copies.
pub fn search_items(items: &[GalleryItem], query: &str) -> Vec<GalleryItem> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return items.to_vec();
    }

    let needle = trimmed.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.caption.to_lowercase().contains(&needle)
                || item
                    .hashtags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Extracts hashtags from a caption in order of appearance.
///
/// Matches are lowercased; repeated hashtags are kept as found. Returns an
/// empty list when the caption holds no hashtag.
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(caption)
        .map(|token| token.as_str().to_lowercase())
        .collect()
}

/// Filters items carrying exactly the given hashtag.
///
/// The argument is lowercased before comparison; stored hashtags are
/// already lowercase by model contract. Substring matches do not count.
pub fn filter_by_hashtag(items: &[GalleryItem], hashtag: &str) -> Vec<GalleryItem> {
    let needle = hashtag.to_lowercase();
    items
        .iter()
        .filter(|item| item.hashtags.iter().any(|tag| tag == &needle))
        .cloned()
        .collect()
}

/// Ranks hashtags by occurrence count across all items, descending.
///
/// Ties keep first-encounter order; callers must not rely on tie order.
/// At most `limit` tags are returned.
pub fn popular_hashtags(items: &[GalleryItem], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        for tag in &item.hashtags {
            match counts.iter_mut().find(|(seen, _)| seen == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts.into_iter().map(|(tag, _)| tag).collect()
}
