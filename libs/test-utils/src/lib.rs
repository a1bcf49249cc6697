pub mod failing_cache;
pub mod fixtures;
pub mod memory_store;
pub mod postgres;
pub mod redis;

pub use failing_cache::FailingCache;
pub use memory_store::InMemoryProductStore;
pub use postgres::TestPostgresContainer;
pub use redis::TestRedisContainer;
