// Private module declarations
mod memory;
mod redis_provider;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::customer::PostalCode;

// Re-export for public API
pub use memory::InMemoryCacheProvider;
pub use redis_provider::RedisCacheProvider;

// ============================================================================
// Cache Provider - process-wide key/value cache
// ============================================================================
//
// Providers store JSON strings; `CacheProviderExt` adds the typed get/set
// used by gateways. Expiry policy belongs to the provider, callers never
// invalidate.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend failure: {0}")]
    Backend(String),

    #[error("Cache value serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Deterministic cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn for_postal_code(postal_code: &PostalCode) -> Self {
        Self(format!("postal-code:{}", postal_code.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get_raw(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    async fn set_raw(&self, key: &CacheKey, value: String) -> Result<(), CacheError>;
}

/// Typed access on top of any [`CacheProvider`]
#[async_trait]
pub trait CacheProviderExt: CacheProvider {
    async fn get<T>(&self, key: &CacheKey) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set<T>(&self, key: &CacheKey, value: &T) -> Result<(), CacheError>
    where
        T: Serialize + Sync,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw).await
    }
}

impl<C: CacheProvider + ?Sized> CacheProviderExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_postal_code_key_uses_normalized_code() {
        let a = CacheKey::for_postal_code(&PostalCode::parse("78085-630").unwrap());
        let b = CacheKey::for_postal_code(&PostalCode::parse("78085630").unwrap());

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "postal-code:78085630");
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_dyn_provider() {
        let cache: std::sync::Arc<dyn CacheProvider> = std::sync::Arc::new(InMemoryCacheProvider::new());
        let key = CacheKey::new("sample");

        cache.set(&key, &Sample { value: 7 }).await.unwrap();
        let cached: Option<Sample> = cache.get(&key).await.unwrap();

        assert_eq!(cached, Some(Sample { value: 7 }));
    }

    #[tokio::test]
    async fn test_undecodable_value_is_serialization_error() {
        let cache = InMemoryCacheProvider::new();
        let key = CacheKey::new("sample");
        cache.set_raw(&key, "not json".to_string()).await.unwrap();

        let result: Result<Option<Sample>, CacheError> = cache.get(&key).await;
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
