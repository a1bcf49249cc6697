use std::convert::Infallible;

use database_traits::connection::{FromRequestParts, Parts};
use deadpool_postgres::{Object, Pool};

use crate::static_vars::{get_read_sql_pool, get_sql_pool};

/// Handle over the primary pool and an optional read replica.
///
/// Cloning is cheap. Each `get_*client` call checks a connection out of the
/// pool; it returns to the pool when the `Object` is dropped, on every exit
/// path of the caller.
#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
    read_pool: Option<Pool>,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            read_pool: None,
        }
    }

    pub fn new_with_read_replica(pool: Pool, read_pool: Pool) -> Self {
        Self {
            pool,
            read_pool: Some(read_pool),
        }
    }

    pub fn from_global() -> Self {
        Self {
            pool: get_sql_pool().clone(),
            read_pool: get_read_sql_pool().cloned(),
        }
    }

    /// Get connection for write operations (always uses primary database)
    pub async fn get_client(
        &self,
    ) -> Result<Object, deadpool_postgres::PoolError> {
        self.pool.get().await
    }

    /// Get connection for read operations (uses read replica if available)
    pub async fn get_read_client(
        &self,
    ) -> Result<Object, deadpool_postgres::PoolError> {
        match &self.read_pool {
            Some(read_pool) => read_pool.get().await,
            None => self.pool.get().await,
        }
    }

    pub fn has_read_replica(&self) -> bool { self.read_pool.is_some() }

    /// Pool statistics: (write available, write size, read stats)
    pub fn get_pool_status(&self) -> (usize, usize, Option<(usize, usize)>) {
        let write_status = self.pool.status();

        let read_stats = self.read_pool.as_ref().map(|pool| {
            let status = pool.status();
            (status.available, status.size)
        });

        (write_status.available, write_status.size, read_stats)
    }
}

impl<S> FromRequestParts<S> for SqlConnect
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts, _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(SqlConnect::from_global())
    }
}
