use async_trait::async_trait;
use catalog_commands::{CreateBrandCommand, UpdateBrandCommand};
use catalog_errors::CatalogError;
use catalog_models::Brand;
use chrono::Utc;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

const BRAND_COLUMNS: &str =
    "id, name, num_brand, is_active, image_link, date_created, updated_at";

#[derive(Clone)]
pub struct BrandDao {
    db: SqlConnect,
}

impl BrandDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    async fn ensure_name_free(
        tx: &Transaction<'_>, name: &str, except_id: Option<i64>,
    ) -> Result<(), CatalogError> {
        let taken = tx
            .query_opt(
                "SELECT 1 FROM brands WHERE name = $1 AND id IS DISTINCT \
                 FROM $2",
                &[&name, &except_id],
            )
            .await?;
        match taken {
            Some(_) => Err(CatalogError::BrandNameExists(name.to_owned())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GenericDao for BrandDao {
    type CreateRequest = CreateBrandCommand;
    type Error = CatalogError;
    type ID = i64;
    type Model = Brand;
    type Response = Brand;
    type UpdateRequest = UpdateBrandCommand;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first()
            .map(|row| self.map_row(row))
            .ok_or(CatalogError::BrandNotFound { brand_id: id })
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {BRAND_COLUMNS} FROM brands ORDER BY name ASC"
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

        Self::ensure_name_free(&tx, &req.name, None).await?;

        let now = Utc::now();
        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO brands (name, num_brand, is_active, \
                     image_link, date_created, updated_at)
                     VALUES ($1, $2, $3, $4, $5, $5)
                     RETURNING {BRAND_COLUMNS}"
                ),
                &[
                    &req.name,
                    &req.num_brand,
                    &req.is_active,
                    &req.image_link,
                    &now,
                ],
            )
            .await?;
        let brand = self.map_row(&row);

        tx.commit().await?;
        Ok(brand)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let exists = tx
            .query_opt("SELECT 1 FROM brands WHERE id = $1 FOR UPDATE", &[
                &id,
            ])
            .await?;
        if exists.is_none() {
            return Err(CatalogError::BrandNotFound { brand_id: id });
        }
        if let Some(name) = &req.name {
            Self::ensure_name_free(&tx, name, Some(id)).await?;
        }

        let row = tx
            .query_one(
                &format!(
                    "UPDATE brands SET
                         name = COALESCE($2, name),
                         num_brand = COALESCE($3, num_brand),
                         is_active = COALESCE($4, is_active),
                         image_link = COALESCE($5, image_link),
                         updated_at = $6
                     WHERE id = $1
                     RETURNING {BRAND_COLUMNS}"
                ),
                &[
                    &id,
                    &req.name,
                    &req.num_brand,
                    &req.is_active,
                    &req.image_link,
                    &Utc::now(),
                ],
            )
            .await?;
        let brand = self.map_row(&row);

        tx.commit().await?;
        Ok(brand)
    }

    /// Refused while any product still references the brand.
    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let row = tx
            .query_opt(
                "SELECT EXISTS(SELECT 1 FROM products WHERE brand_id = $1) \
                 FROM brands WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await?;
        match row.map(|r| r.get::<_, bool>(0)) {
            None => return Err(CatalogError::BrandNotFound { brand_id: id }),
            Some(true) => return Err(CatalogError::BrandInUse { brand_id: id }),
            Some(false) => {}
        }

        tx.execute("DELETE FROM brands WHERE id = $1", &[&id]).await?;
        tx.commit().await?;
        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        Brand {
            id: row.get(0),
            name: row.get(1),
            num_brand: row.get(2),
            is_active: row.get(3),
            image_link: row.get(4),
            date_created: row.get(5),
            updated_at: row.get(6),
        }
    }
}
