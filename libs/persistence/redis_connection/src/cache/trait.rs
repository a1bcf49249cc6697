use std::collections::HashMap;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store of string hashes, shaped after the Redis hash commands.
///
/// Every key holds a flat `field -> value` map. Writing to an existing key
/// merges fields, reading a missing key yields an empty map.
#[async_trait]
pub trait HashCache: Send + Sync {
    /// `HSET key f1 v1 f2 v2 ...`
    async fn hset_all(
        &self, key: &str, fields: &[(String, String)],
    ) -> CacheResult<()>;

    /// `HGETALL key`
    async fn hget_all(&self, key: &str) -> CacheResult<HashMap<String, String>>;

    /// Every key matching a glob `pattern`, in no particular order.
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>>;

    /// Returns how many of `keys` existed.
    async fn delete_keys(&self, keys: &[String]) -> CacheResult<u64>;

    /// Drops every key in the selected database.
    async fn flush_all(&self) -> CacheResult<()>;
}
