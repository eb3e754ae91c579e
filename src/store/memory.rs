//! In-process store.
//!
//! Nothing survives the process.  Used by the test-suite and by
//! `--ephemeral` runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(key);
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
        self.entries.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_of_absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_all_returns_snapshot() {
        let store = MemoryStore::new();
        store.write("b", "2").await.unwrap();
        store.write("a", "1").await.unwrap();

        let mut all = store.read_all().await.unwrap();
        all.sort();
        assert_eq!(
            all,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.delete("nothing").await.unwrap();
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
