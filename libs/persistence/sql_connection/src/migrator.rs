use deadpool_postgres::Pool;
use tracing::{info, instrument};

/// Ordered schema migrations, applied once each.
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_catalog",
        include_str!(
            "../../../../domains/catalog/migrations/sql/001_create_catalog.sql"
        ),
    ),
    (
        "002_create_products",
        include_str!(
            "../../../../domains/products/migrations/sql/002_create_products.sql"
        ),
    ),
    (
        "003_create_specifications",
        include_str!(
            "../../../../domains/specifications/migrations/sql/003_create_specifications.sql"
        ),
    ),
    (
        "004_create_orders",
        include_str!(
            "../../../../domains/orders/migrations/sql/004_create_orders.sql"
        ),
    ),
];

/// Plain SQL migration runner tracking applied names in `_migrations`.
pub struct SqlMigrator {
    pool: Pool,
}

impl SqlMigrator {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    #[instrument(skip_all, name = "run-migrations")]
    pub async fn run_all_migrations(&self) -> anyhow::Result<()> {
        let mut client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                     id SERIAL PRIMARY KEY,
                     name VARCHAR(255) NOT NULL UNIQUE,
                     applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                 )",
            )
            .await?;

        for (name, sql) in MIGRATIONS {
            let applied = client
                .query_opt("SELECT 1 FROM _migrations WHERE name = $1", &[
                    name,
                ])
                .await?
                .is_some();

            if applied {
                info!("Migration {} already applied, skipping", name);
                continue;
            }

            let tx = client.transaction().await?;
            tx.batch_execute(sql).await.map_err(|e| {
                anyhow::anyhow!("Failed to run migration {name}: {e}")
            })?;
            tx.execute("INSERT INTO _migrations (name) VALUES ($1)", &[name])
                .await?;
            tx.commit().await?;

            info!("Migration {} completed successfully", name);
        }

        Ok(())
    }

    pub async fn list_applied_migrations(&self) -> anyhow::Result<Vec<String>> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY id", &[])
            .await?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }
}
