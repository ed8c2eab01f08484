//! In-process key-value store.
//!
//! Backs unit and integration tests, and works as a real store for
//! single-node deployments that can live without durability. All updates on
//! the shared map are serialized by one async mutex, which trivially gives
//! [`KvStore::update`] its single-key isolation guarantee.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::repositories::kv_store::{KvStore, Mutator, StoreResult};

/// HashMap-backed [`KvStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test helper.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn update(&self, key: &str, mutate: Mutator<'_>) -> StoreResult<Vec<u8>> {
        let mut entries = self.entries.lock().await;
        let current = entries.get(key).cloned();
        let next = mutate(current.as_deref())?;
        entries.insert(key.to_string(), next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::kv_store::StoreError;

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_update_sees_current_value() {
        let store = MemoryStore::new();
        store.put("k", b"ab".to_vec()).await.unwrap();

        let written = store
            .update("k", &mut |current| {
                let mut bytes = current.map(<[u8]>::to_vec).unwrap_or_default();
                bytes.push(b'c');
                Ok(bytes)
            })
            .await
            .unwrap();

        assert_eq!(written, b"abc".to_vec());
        assert_eq!(store.get("k").await.unwrap(), Some(b"abc".to_vec()));
    }

    #[tokio::test]
    async fn test_update_absent_key_gets_none() {
        let store = MemoryStore::new();
        store
            .update("fresh", &mut |current| {
                assert!(current.is_none());
                Ok(b"init".to_vec())
            })
            .await
            .unwrap();
        assert_eq!(store.get("fresh").await.unwrap(), Some(b"init".to_vec()));
    }

    #[tokio::test]
    async fn test_update_abort_writes_nothing() {
        let store = MemoryStore::new();
        let result = store
            .update("k", &mut |_| Err(StoreError::Missing("k".to_string())))
            .await;

        assert!(matches!(result, Err(StoreError::Missing(_))));
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_updates_lose_nothing() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .update("counter", &mut |current| {
                        let n = current
                            .and_then(|b| std::str::from_utf8(b).ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(0);
                        Ok((n + 1).to_string().into_bytes())
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("counter").await.unwrap(), Some(b"50".to_vec()));
    }
}
