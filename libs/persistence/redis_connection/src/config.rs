pub trait DbConnectConfig: serde::de::DeserializeOwned {
    #[allow(unused)]
    fn password(&self) -> Option<&str> { None }
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn db(&self) -> u8;
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RedisDbConfig {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
    #[serde(default = "db_default")]
    pub db: u8,
}

impl Default for RedisDbConfig {
    fn default() -> Self {
        Self {
            host: host_default(),
            port: port_default(),
            db: db_default(),
        }
    }
}

/// In-process cache settings. Entries never expire unless `ttl_secs` is set.
///
/// The cache is unbounded unless `capacity` is set. A bound lets moka evict
/// individual `product:*` entries, after which an unfiltered listing served
/// from the cache is a silent subset of the catalog; only set one together
/// with a `ttl_secs` short enough to make that acceptable.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub capacity: Option<u64>,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl DbConnectConfig for RedisDbConfig {
    fn password(&self) -> Option<&str> { None }

    fn host(&self) -> &str { &self.host }

    fn port(&self) -> u16 { self.port }

    fn db(&self) -> u8 { self.db }
}

fn host_default() -> String { "127.0.0.1".into() }
fn port_default() -> u16 { 6379 }
fn db_default() -> u8 { 0 }

impl MemoryConfig {
    pub fn ttl(&self) -> Option<std::time::Duration> {
        self.ttl_secs.map(std::time::Duration::from_secs)
    }
}
