//! Key/value storage layer.
//!
//! This module defines the [`KeyValueStore`] trait and its error type.
//! Concrete stores live in sub-modules: [`MemoryStore`] keeps everything in
//! process, [`FileStore`] persists to a single JSON file.
//!
//! ## For contributors — adding a new store
//!
//! 1. Create a new file in this directory (e.g. `sqlite.rs`).
//! 2. Define a struct and implement [`KeyValueStore`] for it.
//! 3. Add `mod sqlite;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` and hand it to the repository.
//!
//! The repository and the UI only see the trait, so nothing else changes.

mod file;
mod memory;

pub use file::{FileStore, STORE_NAME};
pub use memory::MemoryStore;

use std::path::PathBuf;

use async_trait::async_trait;

/// Errors surfaced by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store file {} is not a string map", .path.display())]
    Corrupt { path: PathBuf },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A durable, asynchronous mapping from string key to string value.
///
/// Every method is atomic with respect to a single key.  `read_all` returns a
/// consistent snapshot of the whole mapping; its order is the store's own
/// enumeration order and callers must not rely on it.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`.  Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    async fn read_all(&self) -> StoreResult<Vec<(String, String)>>;

    async fn clear(&self) -> StoreResult<()>;
}
