//! JSON-file store.
//!
//! The whole mapping lives in memory and is rewritten to disk after every
//! mutation.  Writes go to a sibling temp file first and are then renamed
//! over the real file, so a crash mid-write leaves the previous contents
//! intact.
//!
//! On-disk format is a flat JSON object of string to string:
//!
//! ```json
//! { "Tech": "cnn_tech.rss", "World": "cnn_world.rss" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{KeyValueStore, StoreError, StoreResult};

/// Store identifier; also the file stem on disk.
pub const STORE_NAME: &str = "favoriteFeeds";

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store; the file is only created on the
    /// first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => parse_entries(&bytes, &path)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!(path = %path.display(), entries = entries.len(), "opened feed store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp, &body)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), entries = entries.len(), "persisted feed store");
        Ok(())
    }
}

fn parse_entries(bytes: &[u8], path: &Path) -> StoreResult<BTreeMap<String, String>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(BTreeMap::new());
    }
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Object(map) = value else {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
        });
    };

    map.into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k, s)),
            _ => Err(StoreError::Corrupt {
                path: path.to_path_buf(),
            }),
        })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        // The lock is held across the disk write so concurrent mutations
        // never persist an older map over a newer one.
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries).await {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    async fn read_all(&self) -> StoreResult<Vec<(String, String)>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn clear(&self) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        let previous = std::mem::take(&mut *entries);
        if let Err(e) = self.persist(&entries).await {
            *entries = previous;
            return Err(e);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
