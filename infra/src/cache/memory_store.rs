//! Process-local key-value store with per-key expiry

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use am_core::services::KeyValueStore;

/// In-memory stand-in for Redis
///
/// Expired entries are dropped when read and swept on every write. All
/// operations take the same lock, so `delete` reports `true` to exactly one of several concurrent callers.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Entries held in the map, expired or not
    #[cfg(test)]
    pub(crate) async fn stored(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value.to_string(), now + Duration::from_secs(ttl_seconds)));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .await
            .remove(key)
            .is_some_and(|(_, expires_at)| expires_at > now))
    }
}
