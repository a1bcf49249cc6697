use redis_connection::{
    CacheBackend, HashCache, RedisCache,
    config::{DbConnectConfig, RedisDbConfig},
};
use test_utils::redis::TestRedisContainer;

async fn setup_test_redis() -> anyhow::Result<(TestRedisContainer, RedisCache)>
{
    let container = TestRedisContainer::new().await?;
    container.flush_db().await?;
    let cache = RedisCache::new(container.pool.clone());
    Ok((container, cache))
}

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(f, v)| (f.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_redis_db_config_from_json() {
    let json = r#"{
        "host": "redis.example.com",
        "port": 6380,
        "db": 1
    }"#;

    let config: RedisDbConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.host(), "redis.example.com");
    assert_eq!(config.port(), 6380);
    assert_eq!(config.db(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_hash_round_trip() {
    let (_container, cache) = setup_test_redis().await.unwrap();

    cache
        .hset_all("product:1", &fields(&[("name", "Kettle"), ("price", "40")]))
        .await
        .unwrap();

    let stored = cache.hget_all("product:1").await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.get("name").map(String::as_str), Some("Kettle"));
    assert!(cache.hget_all("product:2").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_scan_and_delete() {
    let (_container, cache) = setup_test_redis().await.unwrap();

    for id in 0..1200 {
        cache
            .hset_all(&format!("product:{id}"), &fields(&[("id", "x")]))
            .await
            .unwrap();
    }
    cache.hset_all("brand:1", &fields(&[("id", "1")])).await.unwrap();

    let keys = cache.scan_keys("product:*").await.unwrap();
    assert_eq!(keys.len(), 1200);

    let removed = cache.delete_keys(&keys).await.unwrap();
    assert_eq!(removed, 1200);
    assert!(cache.scan_keys("product:*").await.unwrap().is_empty());
    assert_eq!(cache.scan_keys("brand:*").await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_backend_flush() {
    let (container, _cache) = setup_test_redis().await.unwrap();
    let backend = CacheBackend::redis(container.pool.clone());

    backend.hset_all("product:7", &fields(&[("id", "7")])).await.unwrap();
    backend.flush_all().await.unwrap();

    assert!(backend.scan_keys("*").await.unwrap().is_empty());
}
