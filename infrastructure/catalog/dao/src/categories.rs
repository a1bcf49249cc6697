use async_trait::async_trait;
use catalog_commands::UpdateCategoryCommand;
use catalog_errors::CatalogError;
use catalog_models::{Category, NewCategory};
use chrono::Utc;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

const CATEGORY_COLUMNS: &str = "id, name, num_category, is_active, \
                                icon_image_link, parent_category_id, \
                                date_created, updated_at";

#[derive(Clone)]
pub struct CategoryDao {
    db: SqlConnect,
}

impl CategoryDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// Top-level categories, newest first.
    #[instrument(skip(self))]
    pub async fn parents(&self) -> Result<Vec<Category>, CatalogError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories
                 WHERE parent_category_id IS NULL
                 ORDER BY date_created DESC, id DESC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    async fn ensure_name_free(
        tx: &Transaction<'_>, name: &str, except_id: Option<i64>,
    ) -> Result<(), CatalogError> {
        let taken = tx
            .query_opt(
                "SELECT 1 FROM categories WHERE name = $1 AND id IS \
                 DISTINCT FROM $2",
                &[&name, &except_id],
            )
            .await?;
        match taken {
            Some(_) => Err(CatalogError::CategoryNameExists(name.to_owned())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GenericDao for CategoryDao {
    type CreateRequest = NewCategory;
    type Error = CatalogError;
    type ID = i64;
    type Model = Category;
    type Response = Category;
    type UpdateRequest = UpdateCategoryCommand;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first()
            .map(|row| self.map_row(row))
            .ok_or(CatalogError::CategoryNotFound { category_id: id })
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories
                 ORDER BY date_created DESC, id DESC"
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

        if let Some(parent_id) = req.parent_category_id {
            let parent = tx
                .query_opt("SELECT 1 FROM categories WHERE id = $1", &[
                    &parent_id,
                ])
                .await?;
            if parent.is_none() {
                return Err(CatalogError::ParentNotFound {
                    category_id: parent_id,
                });
            }
        }
        Self::ensure_name_free(&tx, &req.name, None).await?;

        let now = Utc::now();
        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO categories (name, num_category, is_active, \
                     icon_image_link, parent_category_id, date_created, \
                     updated_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $6)
                     RETURNING {CATEGORY_COLUMNS}"
                ),
                &[
                    &req.name,
                    &req.num_category,
                    &req.is_active,
                    &req.icon_image_link,
                    &req.parent_category_id,
                    &now,
                ],
            )
            .await?;
        let category = self.map_row(&row);

        tx.commit().await?;
        Ok(category)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let exists = tx
            .query_opt("SELECT 1 FROM categories WHERE id = $1 FOR UPDATE", &[
                &id,
            ])
            .await?;
        if exists.is_none() {
            return Err(CatalogError::CategoryNotFound { category_id: id });
        }
        if let Some(name) = &req.name {
            Self::ensure_name_free(&tx, name, Some(id)).await?;
        }

        let row = tx
            .query_one(
                &format!(
                    "UPDATE categories SET
                         name = COALESCE($2, name),
                         num_category = COALESCE($3, num_category),
                         is_active = COALESCE($4, is_active),
                         icon_image_link = COALESCE($5, icon_image_link),
                         updated_at = $6
                     WHERE id = $1
                     RETURNING {CATEGORY_COLUMNS}"
                ),
                &[
                    &id,
                    &req.name,
                    &req.num_category,
                    &req.is_active,
                    &req.icon_image_link,
                    &Utc::now(),
                ],
            )
            .await?;
        let category = self.map_row(&row);

        tx.commit().await?;
        Ok(category)
    }

    /// Child categories and every product filed under the deleted ones go
    /// with it (`ON DELETE CASCADE`).
    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let removed = client
            .execute("DELETE FROM categories WHERE id = $1", &[&id])
            .await?;

        if removed == 0 {
            return Err(CatalogError::CategoryNotFound { category_id: id });
        }
        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        Category {
            id: row.get(0),
            name: row.get(1),
            num_category: row.get(2),
            is_active: row.get(3),
            icon_image_link: row.get(4),
            parent_category_id: row.get(5),
            date_created: row.get(6),
            updated_at: row.get(7),
        }
    }
}
