use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheError, CacheKey, CacheProvider};

/// Process-local cache with an optional time-to-live
pub struct InMemoryCacheProvider {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

struct Entry {
    value: String,
    stored_at: Instant,
}

impl InMemoryCacheProvider {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: None,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.ttl
            .map(|ttl| entry.stored_at.elapsed() >= ttl)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCacheProvider {
    async fn get_raw(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key.as_str()) {
                None => return Ok(None),
                Some(entry) if !self.is_expired(entry) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it so the map does not grow with stale entries
        let mut entries = self.entries.write().await;
        if entries.get(key.as_str()).is_some_and(|entry| self.is_expired(entry)) {
            entries.remove(key.as_str());
            tracing::debug!(key = %key, "Evicted expired cache entry");
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.as_str().to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }
}
