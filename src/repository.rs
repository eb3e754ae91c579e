//! Feed bookmarks on top of a [`KeyValueStore`].
//!
//! The repository is the only place that knows a feed's tag is its storage
//! key.  Every method issues exactly one store operation and hands the
//! store's error straight back; there are no retries.

use std::sync::Arc;

use tracing::debug;

use crate::feed::FeedRecord;
use crate::store::{KeyValueStore, StoreResult};

/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct FeedRepository {
    store: Arc<dyn KeyValueStore>,
}

impl FeedRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Path stored under `tag`, or `None` if the tag is unknown.
    ///
    /// A tag explicitly mapped to an empty path yields `Some("")`.
    pub async fn get_feed(&self, tag: &str) -> StoreResult<Option<String>> {
        self.store.read(tag).await
    }

    /// Store `feed`, replacing any existing feed with the same tag.
    pub async fn set_feed(&self, feed: &FeedRecord) -> StoreResult<()> {
        debug!(tag = %feed.tag, path = %feed.path, "set feed");
        self.store.write(&feed.tag, &feed.path).await
    }

    /// Remove the feed keyed by `feed.tag`.  Unknown tags are ignored.
    pub async fn remove_feed(&self, feed: &FeedRecord) -> StoreResult<()> {
        debug!(tag = %feed.tag, "remove feed");
        self.store.delete(&feed.tag).await
    }

    /// Every stored feed, in the store's enumeration order.
    ///
    /// Built from a single snapshot, so keys and paths always come from the
    /// same store state.  Sort the result for display.
    pub async fn list_all_feeds(&self) -> StoreResult<Vec<FeedRecord>> {
        let entries = self.store.read_all().await?;
        Ok(entries
            .into_iter()
            .map(|(tag, path)| FeedRecord { tag, path })
            .collect())
    }

    pub async fn clear_all_feeds(&self) -> StoreResult<()> {
        debug!("clear all feeds");
        self.store.clear().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
