pub use config::{
    DbConnectConfig, DbOptionsConfig, PostgresDbConfig, ReadReplicaConfig,
};
pub use database_traits;
pub use deadpool_postgres::PoolError;
pub use impl_get_connect::SqlConnect;
pub use migrator::SqlMigrator;
pub use tokio_postgres::Error as PgError;

pub mod config;
mod impl_get_connect;
pub mod migrator;
mod static_vars;

pub use static_vars::{
    build_pool, connect_postgres_db, connect_postgres_read_replica,
};
