use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use redis_connection::{CacheError, CacheResult, HashCache};

/// Cache whose every operation fails, as when Redis is unreachable.
#[derive(Default)]
pub struct FailingCache {
    calls: AtomicUsize,
    flushes: AtomicUsize,
}

impl FailingCache {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    /// Flush attempts, all of which failed.
    pub fn flush_attempts(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> CacheResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl HashCache for FailingCache {
    async fn hset_all(
        &self, _key: &str, _fields: &[(String, String)],
    ) -> CacheResult<()> {
        self.fail()
    }

    async fn hget_all(&self, _key: &str) -> CacheResult<HashMap<String, String>> {
        self.fail()
    }

    async fn scan_keys(&self, _pattern: &str) -> CacheResult<Vec<String>> {
        self.fail()
    }

    async fn delete_keys(&self, _keys: &[String]) -> CacheResult<u64> {
        self.fail()
    }

    async fn flush_all(&self) -> CacheResult<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        self.fail()
    }
}
