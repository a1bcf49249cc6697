use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    cache::{CacheResult, HashCache, Memory, RedisCache},
    config::MemoryConfig,
};

/// The cache deployments the service knows how to run against.
#[derive(Clone)]
pub enum CacheBackend {
    Redis(RedisCache),
    Memory(Memory),
}

impl CacheBackend {
    pub fn redis(pool: deadpool_redis::Pool) -> Self {
        Self::Redis(RedisCache::new(pool))
    }

    pub fn memory(config: MemoryConfig) -> Self {
        Self::Memory(Memory::new(config))
    }

    pub fn is_redis(&self) -> bool { matches!(self, Self::Redis(_)) }

    fn inner(&self) -> &dyn HashCache {
        match self {
            Self::Redis(cache) => cache,
            Self::Memory(cache) => cache,
        }
    }
}

#[async_trait]
impl HashCache for CacheBackend {
    async fn hset_all(
        &self, key: &str, fields: &[(String, String)],
    ) -> CacheResult<()> {
        self.inner().hset_all(key, fields).await
    }

    async fn hget_all(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        self.inner().hget_all(key).await
    }

    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        self.inner().scan_keys(pattern).await
    }

    async fn delete_keys(&self, keys: &[String]) -> CacheResult<u64> {
        self.inner().delete_keys(keys).await
    }

    async fn flush_all(&self) -> CacheResult<()> {
        self.inner().flush_all().await
    }
}
