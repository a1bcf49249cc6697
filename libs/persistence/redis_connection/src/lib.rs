use deadpool_redis::{Config, Pool, Runtime};
pub use deadpool_redis::PoolError;
pub use redis::RedisError;
use tracing::{info, instrument};
use url::Url;

pub mod backend;
pub mod cache;
pub mod cache_provider;
pub mod config;
pub mod pattern;

pub use backend::CacheBackend;
pub use cache::{CacheError, CacheResult, HashCache, Memory, RedisCache};
pub use cache_provider::CacheProvider;

pub(crate) fn redis_url<C>(config: &C) -> anyhow::Result<Url>
where
    C: config::DbConnectConfig,
{
    let mut url = Url::parse("redis://")?;

    url.set_host(Some(config.host()))?;
    url.set_port(Some(config.port()))
        .map_err(|_| anyhow::anyhow!("redis url cannot carry a port"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("redis url cannot carry a path"))?
        .extend(&[config.db().to_string()]);

    Ok(url)
}

#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> anyhow::Result<Pool>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(redis.url = %url, redis.connect = true);

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(deadpool_redis::PoolConfig::default()),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let config = config::RedisDbConfig {
            host: "localhost".to_string(),
            port: 6379,
            db: 2,
        };

        let url = redis_url(&config).unwrap();
        assert_eq!(url.to_string(), "redis://localhost:6379/2");
    }

    #[test]
    fn test_redis_db_config_default() {
        use config::RedisDbConfig;

        let json = r#"{}"#;
        let config: RedisDbConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 0);
    }
}
