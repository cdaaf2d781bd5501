//! In-memory session store with per-key TTLs.
//!
//! The test double for the Redis-backed store, also usable for local
//! development. Expiry is lazy: an expired entry is dropped the next time
//! it is observed, mirroring the "lookup miss means gone" semantics
//! callers rely on.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use abode_core::error::AbodeResult;
use abode_core::store::SessionStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Cloneable handle to a shared in-memory keyspace.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }
}

impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> AbodeResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> AbodeResult<()> {
        let entry = Entry {
            value: value.to_owned(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.write().await.insert(key.to_owned(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AbodeResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test]
    async fn set_get_delete() {
        let store = MemoryStore::new();
        store.set("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_absent_key_is_not_an_error() {
        let store = MemoryStore::new();
        store.delete("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn set_replaces_existing_value() {
        let store = MemoryStore::new();
        store.set("k", "old", 60).await.unwrap();
        store.set("k", "new", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_independently() {
        let store = MemoryStore::new();
        store.set("short", "a", 10).await.unwrap();
        store.set("long", "b", 100).await.unwrap();

        time::advance(Duration::from_secs(11)).await;
        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("long").await.unwrap().as_deref(), Some("b"));

        time::advance(Duration::from_secs(100)).await;
        assert_eq!(store.get("long").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_is_immediately_expired() {
        let store = MemoryStore::new();
        store.set("k", "v", 0).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_keyspace() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v", 60).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(other.len().await, 1);
    }
}
