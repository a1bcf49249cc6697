use std::sync::{Arc, OnceLock};

use tracing::warn;

use crate::{backend::CacheBackend, cache::HashCache, config::MemoryConfig};

static CACHE_BACKEND: OnceLock<Arc<CacheBackend>> = OnceLock::new();

pub struct CacheProvider;

impl CacheProvider {
    /// Initialize the global cache backend with a Redis pool
    pub fn init_redis_static(pool: deadpool_redis::Pool) {
        Self::install(CacheBackend::redis(pool));
    }

    /// Initialize the global cache backend with an in-process cache
    pub fn init_memory_static(config: MemoryConfig) {
        Self::install(CacheBackend::memory(config));
    }

    fn install(backend: CacheBackend) {
        if CACHE_BACKEND.set(Arc::new(backend)).is_err() {
            warn!("cache backend already initialized, keeping the first one");
        }
    }

    /// The global backend, if one was installed.
    pub fn try_get_backend() -> Option<Arc<CacheBackend>> {
        CACHE_BACKEND.get().cloned()
    }

    /// The global backend as a shared [`HashCache`].
    ///
    /// # Panics
    /// When called before one of the `init_*_static` functions.
    pub fn shared() -> Arc<dyn HashCache> {
        Self::try_get_backend().expect(
            "Cache backend not initialized. Call \
             CacheProvider::init_*_static() first",
        )
    }

    /// A fresh in-process backend with default settings
    pub fn default_memory_backend() -> CacheBackend {
        CacheBackend::memory(MemoryConfig::default())
    }
}
