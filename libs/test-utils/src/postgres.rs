use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::Pool;
use sql_connection::{SqlConnect, SqlMigrator, build_pool};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};

/// PostgreSQL test container with the catalog schema applied
pub struct TestPostgresContainer {
    pub pool: Pool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string = format!(
            "postgresql://testuser:testpass@{host}:{port}/testdb"
        );

        let pool = Self::create_pool(&connection_string).await?;

        let instance = Self {
            pool,
            connection_string,
            _container: container,
        };

        SqlMigrator::new(instance.pool.clone())
            .run_all_migrations()
            .await
            .context("Failed to apply migrations")?;

        Ok(instance)
    }

    async fn create_pool(connection_string: &str) -> Result<Pool> {
        let pool = build_pool(connection_string, Some(10))
            .context("Failed to build PostgreSQL connection pool")?;

        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(client) => {
                    match client.query_one("SELECT 1", &[]).await {
                        Ok(_) => break,
                        Err(_) if attempts < 20 => {
                            attempts += 1;
                            tokio::time::sleep(Duration::from_millis(500))
                                .await;
                            continue;
                        }
                        Err(e) => {
                            return Err(e).context("PostgreSQL not ready");
                        }
                    }
                }
                Err(_) if attempts < 20 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
                Err(e) => {
                    return Err(e)
                        .context("Failed to get PostgreSQL connection");
                }
            }
        }

        Ok(pool)
    }

    pub fn sql_connect(&self) -> SqlConnect {
        SqlConnect::new(self.pool.clone())
    }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }

    pub async fn insert_category(
        &self, name: &str, parent_category_id: Option<i64>,
    ) -> Result<i64> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO categories (name, parent_category_id) VALUES \
                 ($1, $2) RETURNING id",
                &[&name, &parent_category_id],
            )
            .await?;
        Ok(row.get(0))
    }

    pub async fn insert_brand(&self, name: &str) -> Result<i64> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO brands (name) VALUES ($1) RETURNING id",
                &[&name],
            )
            .await?;
        Ok(row.get(0))
    }

    /// Inserts a product with fixed attributes and the given price.
    pub async fn insert_product(
        &self, category_id: i64, brand_id: i64, price: i64,
    ) -> Result<i64> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO products (category_id, brand_id, author_id, \
                 name, model_name, search_string, price, image_link) \
                 VALUES ($1, $2, 1, 'Kettle', 'KT-1', 'kettle', $3, '') \
                 RETURNING id",
                &[&category_id, &brand_id, &price],
            )
            .await?;
        Ok(row.get(0))
    }
}
