pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn uri(&self) -> &str;
}

/// Configure database connection pool data
pub trait DbOptionsConfig {
    fn max_conn(&self) -> Option<u32> { None }
    fn min_conn(&self) -> Option<u32> { None }
    fn sql_logger(&self) -> bool { false }
}

pub trait ReadReplicaConfig {
    fn read_replica_uri(&self) -> Option<&str>;
    fn read_max_conn(&self) -> Option<u32> { None }
    fn read_min_conn(&self) -> Option<u32> { None }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PostgresDbConfig {
    pub uri: String,
    pub max_conn: Option<u32>,
    pub min_conn: Option<u32>,
    #[serde(default = "logger_default")]
    pub logger: bool,
    #[serde(default)]
    pub read_replica_uri: Option<String>,
    #[serde(default)]
    pub read_max_conn: Option<u32>,
    #[serde(default)]
    pub read_min_conn: Option<u32>,
}

impl PostgresDbConfig {
    pub fn enable_read_write_split(&self) -> bool {
        self.read_replica_uri.is_some()
    }
}

impl DbConnectConfig for PostgresDbConfig {
    fn uri(&self) -> &str { &self.uri }
}

impl DbOptionsConfig for PostgresDbConfig {
    fn max_conn(&self) -> Option<u32> { self.max_conn }

    fn min_conn(&self) -> Option<u32> { self.min_conn }

    fn sql_logger(&self) -> bool { self.logger }
}

impl ReadReplicaConfig for PostgresDbConfig {
    fn read_replica_uri(&self) -> Option<&str> {
        self.read_replica_uri.as_deref()
    }

    fn read_max_conn(&self) -> Option<u32> { self.read_max_conn }

    fn read_min_conn(&self) -> Option<u32> { self.read_min_conn }
}

fn logger_default() -> bool { false }
