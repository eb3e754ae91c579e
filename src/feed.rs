//! The feed bookmark type shared by the store, the repository and the UI.
//!
//! A `FeedRecord` is a `(tag, path)` pair.  The tag doubles as the storage
//! key, so two records with the same tag cannot coexist in the store: writing
//! the second one overwrites the first.
//!
//! ## For contributors
//!
//! The repository stores whatever it is given, including empty strings.
//! Rejecting empty input is the UI's job (see [`crate::app::App::save_draft`]).

use std::cmp::Ordering;

/// A single feed bookmark.
///
/// ## Sorting
///
/// `FeedRecord` implements [`Ord`] by tag, **case-insensitively**, which is
/// the display order of the feed list.  Tags that differ only by case fall
/// back to an exact comparison so the ordering stays total.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FeedRecord {
    /// User-chosen label, also the storage key.
    pub tag: String,

    /// Resource path appended to the configured base URL when opened.
    pub path: String,
}

impl FeedRecord {
    pub fn new(tag: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            path: path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ordering — by tag, case-insensitive
// ---------------------------------------------------------------------------

impl Ord for FeedRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        let folded = self
            .tag
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(other.tag.chars().flat_map(char::to_lowercase));

        folded
            .then_with(|| self.tag.cmp(&other.tag))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for FeedRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_tag_ignoring_case() {
        let mut feeds = vec![
            FeedRecord::new("world", "cnn_world.rss"),
            FeedRecord::new("Tech", "cnn_tech.rss"),
            FeedRecord::new("top", "cnn_topstories.rss"),
        ];
        feeds.sort();

        let tags: Vec<&str> = feeds.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, ["Tech", "top", "world"]);
    }

    #[test]
    fn tags_differing_only_by_case_are_not_equal() {
        let upper = FeedRecord::new("Tech", "a.rss");
        let lower = FeedRecord::new("tech", "a.rss");
        assert_ne!(upper.cmp(&lower), Ordering::Equal);
    }

    #[test]
    fn scenario_tech_before_world() {
        let mut feeds = vec![
            FeedRecord::new("World", "cnn_world.rss"),
            FeedRecord::new("Tech", "cnn_tech.rss"),
        ];
        feeds.sort();

        assert_eq!(feeds[0], FeedRecord::new("Tech", "cnn_tech.rss"));
        assert_eq!(feeds[1], FeedRecord::new("World", "cnn_world.rss"));
    }
}
