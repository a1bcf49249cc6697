use async_trait::async_trait;
use chrono::Utc;
use database_traits::dao::GenericDao;
use specification_commands::ProductSpecificationCommand;
use specification_errors::SpecificationError;
use specification_models::{ProductSpecification, ProductSpecificationValue};
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

const PRODUCT_SPECIFICATION_COLUMNS: &str =
    "id, product_id, specification_id, value, date_created, updated_at";

#[derive(Clone)]
pub struct ProductSpecificationDao {
    db: SqlConnect,
}

impl ProductSpecificationDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// A product's values joined with their specification names.
    #[instrument(skip(self))]
    pub async fn values_for_product(
        &self, product_id: i64,
    ) -> Result<Vec<ProductSpecificationValue>, SpecificationError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT ps.id, s.name, ps.value, s.category_id
                 FROM product_specifications ps
                 JOIN specifications s ON s.id = ps.specification_id
                 WHERE ps.product_id = $1
                 ORDER BY ps.id ASC",
            )
            .await?;
        let rows = client.query(&stmt, &[&product_id]).await?;

        Ok(rows
            .iter()
            .map(|row| ProductSpecificationValue {
                id: row.get(0),
                name: row.get(1),
                value: row.get(2),
                category_id: row.get(3),
            })
            .collect())
    }

    async fn ensure_references(
        tx: &Transaction<'_>, req: &ProductSpecificationCommand,
    ) -> Result<(), SpecificationError> {
        let product = tx
            .query_opt("SELECT 1 FROM products WHERE id = $1 FOR SHARE", &[
                &req.product_id,
            ])
            .await?;
        if product.is_none() {
            return Err(SpecificationError::UnknownProduct {
                product_id: req.product_id,
            });
        }

        let specification = tx
            .query_opt(
                "SELECT 1 FROM specifications WHERE id = $1 FOR SHARE",
                &[&req.specification_id],
            )
            .await?;
        if specification.is_none() {
            return Err(SpecificationError::UnknownSpecification {
                specification_id: req.specification_id,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GenericDao for ProductSpecificationDao {
    type CreateRequest = ProductSpecificationCommand;
    type Error = SpecificationError;
    type ID = i64;
    type Model = ProductSpecification;
    type Response = ProductSpecification;
    type UpdateRequest = ProductSpecificationCommand;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {PRODUCT_SPECIFICATION_COLUMNS}
                 FROM product_specifications WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first().map(|row| self.map_row(row)).ok_or(
            SpecificationError::ProductSpecificationNotFound {
                product_specification_id: id,
            },
        )
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {PRODUCT_SPECIFICATION_COLUMNS}
                 FROM product_specifications ORDER BY id ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    #[instrument(skip(self))]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        Self::ensure_references(&tx, &req).await?;

        let now = Utc::now();
        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO product_specifications (product_id, \
                     specification_id, value, date_created, updated_at)
                     VALUES ($1, $2, $3, $4, $4)
                     RETURNING {PRODUCT_SPECIFICATION_COLUMNS}"
                ),
                &[
                    &req.product_id,
                    &req.specification_id,
                    &req.value.trim(),
                    &now,
                ],
            )
            .await?;
        let created = self.map_row(&row);

        tx.commit().await?;
        Ok(created)
    }

    /// Replaces every field of the row.
    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let exists = tx
            .query_opt(
                "SELECT 1 FROM product_specifications WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await?;
        if exists.is_none() {
            return Err(SpecificationError::ProductSpecificationNotFound {
                product_specification_id: id,
            });
        }
        Self::ensure_references(&tx, &req).await?;

        let row = tx
            .query_one(
                &format!(
                    "UPDATE product_specifications SET
                         product_id = $2,
                         specification_id = $3,
                         value = $4,
                         updated_at = $5
                     WHERE id = $1
                     RETURNING {PRODUCT_SPECIFICATION_COLUMNS}"
                ),
                &[
                    &id,
                    &req.product_id,
                    &req.specification_id,
                    &req.value.trim(),
                    &Utc::now(),
                ],
            )
            .await?;
        let updated = self.map_row(&row);

        tx.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let removed = client
            .execute("DELETE FROM product_specifications WHERE id = $1", &[
                &id,
            ])
            .await?;

        if removed == 0 {
            return Err(SpecificationError::ProductSpecificationNotFound {
                product_specification_id: id,
            });
        }
        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        ProductSpecification {
            id: row.get(0),
            product_id: row.get(1),
            specification_id: row.get(2),
            value: row.get(3),
            date_created: row.get(4),
            updated_at: row.get(5),
        }
    }
}
