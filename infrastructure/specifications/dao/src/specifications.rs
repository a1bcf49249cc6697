use async_trait::async_trait;
use database_traits::dao::GenericDao;
use specification_commands::{
    CreateSpecificationCommand, UpdateSpecificationCommand,
};
use specification_errors::SpecificationError;
use specification_models::{CategorySpecification, Specification};
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

const SPECIFICATION_COLUMNS: &str = "id, name, category_id";

#[derive(Clone)]
pub struct SpecificationDao {
    db: SqlConnect,
}

impl SpecificationDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// Specifications defined for one category, in creation order.
    #[instrument(skip(self))]
    pub async fn for_category(
        &self, category_id: i64,
    ) -> Result<Vec<CategorySpecification>, SpecificationError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {SPECIFICATION_COLUMNS} FROM specifications
                 WHERE category_id = $1 ORDER BY id ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[&category_id]).await?;

        Ok(rows
            .iter()
            .map(|row| CategorySpecification::from(self.map_row(row)))
            .collect())
    }

    async fn ensure_category(
        tx: &Transaction<'_>, category_id: i64,
    ) -> Result<(), SpecificationError> {
        let found = tx
            .query_opt("SELECT 1 FROM categories WHERE id = $1 FOR SHARE", &[
                &category_id,
            ])
            .await?;
        match found {
            Some(_) => Ok(()),
            None => Err(SpecificationError::UnknownCategory { category_id }),
        }
    }
}

#[async_trait]
impl GenericDao for SpecificationDao {
    type CreateRequest = CreateSpecificationCommand;
    type Error = SpecificationError;
    type ID = i64;
    type Model = Specification;
    type Response = Specification;
    type UpdateRequest = UpdateSpecificationCommand;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {SPECIFICATION_COLUMNS} FROM specifications WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first().map(|row| self.map_row(row)).ok_or(
            SpecificationError::SpecificationNotFound {
                specification_id: id,
            },
        )
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {SPECIFICATION_COLUMNS} FROM specifications ORDER BY id ASC"
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

        Self::ensure_category(&tx, req.category_id).await?;

        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO specifications (name, category_id)
                     VALUES ($1, $2)
                     RETURNING {SPECIFICATION_COLUMNS}"
                ),
                &[&req.name, &req.category_id],
            )
            .await?;
        let specification = self.map_row(&row);

        tx.commit().await?;
        Ok(specification)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let exists = tx
            .query_opt(
                "SELECT 1 FROM specifications WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await?;
        if exists.is_none() {
            return Err(SpecificationError::SpecificationNotFound {
                specification_id: id,
            });
        }
        if let Some(category_id) = req.category_id {
            Self::ensure_category(&tx, category_id).await?;
        }

        let row = tx
            .query_one(
                &format!(
                    "UPDATE specifications SET
                         name = COALESCE($2, name),
                         category_id = COALESCE($3, category_id)
                     WHERE id = $1
                     RETURNING {SPECIFICATION_COLUMNS}"
                ),
                &[&id, &req.name, &req.category_id],
            )
            .await?;
        let specification = self.map_row(&row);

        tx.commit().await?;
        Ok(specification)
    }

    /// Product values for the specification go with it (`ON DELETE CASCADE`).
    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let removed = client
            .execute("DELETE FROM specifications WHERE id = $1", &[&id])
            .await?;

        if removed == 0 {
            return Err(SpecificationError::SpecificationNotFound {
                specification_id: id,
            });
        }
        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        Specification {
            id: row.get(0),
            name: row.get(1),
            category_id: row.get(2),
        }
    }
}
