use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use moka::future::Cache;

use super::r#trait::{CacheResult, HashCache};
use crate::{config::MemoryConfig, pattern::glob_match};

type Fields = Arc<HashMap<String, String>>;

/// In-process [`HashCache`] backed by moka. Used when no Redis is configured
/// and throughout the test suites.
#[derive(Clone)]
pub struct Memory {
    memory: Cache<String, Fields>,
    config: MemoryConfig,
}

impl Memory {
    pub fn new(config: MemoryConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(capacity) = config.capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = config.ttl() {
            builder = builder.time_to_live(ttl);
        }

        Self {
            memory: builder.build(),
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig { &self.config }
}

impl Default for Memory {
    fn default() -> Self { Self::new(MemoryConfig::default()) }
}

#[async_trait]
impl HashCache for Memory {
    async fn hset_all(
        &self, key: &str, fields: &[(String, String)],
    ) -> CacheResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut merged = self
            .memory
            .get(key)
            .await
            .map(|existing| (*existing).clone())
            .unwrap_or_default();
        merged.extend(fields.iter().cloned());

        self.memory.insert(key.to_owned(), Arc::new(merged)).await;
        Ok(())
    }

    async fn hget_all(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        Ok(self
            .memory
            .get(key)
            .await
            .map(|fields| (*fields).clone())
            .unwrap_or_default())
    }

    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        Ok(self
            .memory
            .iter()
            .filter(|(key, _)| glob_match(pattern, key))
            .map(|(key, _)| key.as_ref().clone())
            .collect())
    }

    async fn delete_keys(&self, keys: &[String]) -> CacheResult<u64> {
        let mut removed = 0;
        for key in keys {
            if self.memory.remove(key).await.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn flush_all(&self) -> CacheResult<()> {
        let keys: Vec<Arc<String>> =
            self.memory.iter().map(|(key, _)| key).collect();
        for key in keys {
            self.memory.invalidate(key.as_ref()).await;
        }
        self.memory.run_pending_tasks().await;
        Ok(())
    }
}
