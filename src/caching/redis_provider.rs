use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use super::{CacheError, CacheKey, CacheProvider};

/// Redis-backed cache shared by every instance of the service
#[derive(Clone)]
pub struct RedisCacheProvider {
    connection: MultiplexedConnection,
    ttl: Option<Duration>,
}

impl RedisCacheProvider {
    pub async fn connect(url: &str, ttl: Option<Duration>) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(backend)?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend)?;

        tracing::info!(ttl_secs = ttl.map(|t| t.as_secs()), "Connected to Redis cache");

        Ok(Self { connection, ttl })
    }
}

fn backend(err: redis::RedisError) -> CacheError {
    CacheError::Backend(err.to_string())
}

/// `SETEX` seconds for a TTL. Redis rejects 0, so sub-second TTLs round up to 1.
fn expiry_secs(ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|ttl| ttl.as_secs().max(1))
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_raw(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        conn.get(key.as_str()).await.map_err(backend)
    }

    async fn set_raw(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        match expiry_secs(self.ttl) {
            Some(secs) => conn
                .set_ex::<_, _, ()>(key.as_str(), value, secs)
                .await
                .map_err(backend),
            None => conn
                .set::<_, _, ()>(key.as_str(), value)
                .await
                .map_err(backend),
        }
    }
}
