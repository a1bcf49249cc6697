pub mod memory;
pub mod redis_cache;
pub mod r#trait;

pub use memory::Memory;
pub use redis_cache::RedisCache;
pub use r#trait::{CacheError, CacheResult, HashCache};
