use async_trait::async_trait;
use chrono::Utc;
use dao_utils::{
    pagination::PaginationParams,
    query_helpers::{WhereBuilder, param_refs},
};
use database_traits::dao::GenericDao;
use product_errors::ProductError;
use product_models::{
    NewProduct, Product, ProductChanges, ProductPredicate, ProductSelection,
};
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

mod store;

pub use store::ProductStore;

const PRODUCT_COLUMNS: &str = "id, category_id, brand_id, author_id, name, \
                               model_name, search_string, price, \
                               num_product, discount, image_link, is_super, \
                               is_new, is_active, date_created, updated_at";

const LISTING_ORDER: &str = "ORDER BY date_created DESC, id DESC";

/// Renders the conjunction of a selection's predicates and search term.
pub fn selection_where(selection: &ProductSelection) -> WhereBuilder {
    let mut builder = WhereBuilder::new();

    for predicate in &selection.predicates {
        builder = match predicate {
            ProductPredicate::CategoryIn(ids) => {
                builder.any_of("category_id", ids.clone())
            }
            ProductPredicate::BrandEq(id) => {
                builder.compare("brand_id", "=", *id)
            }
            ProductPredicate::InStock => builder.raw("num_product > 0"),
            ProductPredicate::Discounted => builder.raw("discount > 0"),
            ProductPredicate::PriceAtMost(max) => {
                builder.compare("price", "<=", *max)
            }
        };
    }

    if let Some(term) = &selection.search {
        builder = builder.contains("search_string", term);
    }

    builder
}

#[derive(Clone)]
pub struct ProductDao {
    db: SqlConnect,
}

impl ProductDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    async fn ensure_references(
        tx: &Transaction<'_>, category_id: Option<i64>, brand_id: Option<i64>,
    ) -> Result<(), ProductError> {
        if let Some(category_id) = category_id {
            let found = tx
                .query_opt("SELECT 1 FROM categories WHERE id = $1", &[
                    &category_id,
                ])
                .await?;
            if found.is_none() {
                return Err(ProductError::CategoryNotFound { category_id });
            }
        }

        if let Some(brand_id) = brand_id {
            let found = tx
                .query_opt("SELECT 1 FROM brands WHERE id = $1", &[&brand_id])
                .await?;
            if found.is_none() {
                return Err(ProductError::BrandNotFound { brand_id });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl GenericDao for ProductDao {
    type CreateRequest = NewProduct;
    type Error = ProductError;
    type ID = i64;
    type Model = Product;
    type Response = Product;
    type UpdateRequest = ProductChanges;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        let product = rows
            .first()
            .map(|row| self.map_row(row))
            .ok_or(ProductError::NotFound { product_id: id })?;

        Ok(product)
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        self.find_products(&ProductSelection::all()).await
    }

    #[instrument(skip_all)]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        Self::ensure_references(&tx, Some(req.category_id), Some(req.brand_id))
            .await?;

        let now = Utc::now();
        let stmt = tx
            .prepare(&format!(
                "INSERT INTO products (category_id, brand_id, author_id, \
                 name, model_name, search_string, price, num_product, \
                 discount, image_link, is_super, is_new, is_active, \
                 date_created, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                 $13, $14, $14)
                 RETURNING {PRODUCT_COLUMNS}"
            ))
            .await?;
        let row = tx
            .query_one(&stmt, &[
                &req.category_id,
                &req.brand_id,
                &req.author_id,
                &req.name,
                &req.model_name,
                &req.search_string,
                &req.price,
                &req.num_product,
                &req.discount,
                &req.image_link,
                &req.is_super,
                &req.is_new,
                &req.is_active,
                &now,
            ])
            .await?;
        let product = self.map_row(&row);

        tx.commit().await?;
        Ok(product)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        let exists = tx
            .query_opt("SELECT 1 FROM products WHERE id = $1 FOR UPDATE", &[
                &id,
            ])
            .await?;
        if exists.is_none() {
            return Err(ProductError::NotFound { product_id: id });
        }

        Self::ensure_references(&tx, req.category_id, req.brand_id).await?;

        let stmt = tx
            .prepare(&format!(
                "UPDATE products SET
                     category_id = COALESCE($2, category_id),
                     brand_id = COALESCE($3, brand_id),
                     author_id = COALESCE($4, author_id),
                     name = COALESCE($5, name),
                     model_name = COALESCE($6, model_name),
                     search_string = COALESCE($7, search_string),
                     price = COALESCE($8, price),
                     num_product = COALESCE($9, num_product),
                     discount = COALESCE($10, discount),
                     image_link = COALESCE($11, image_link),
                     is_super = COALESCE($12, is_super),
                     is_new = COALESCE($13, is_new),
                     is_active = COALESCE($14, is_active),
                     updated_at = $15
                 WHERE id = $1
                 RETURNING {PRODUCT_COLUMNS}"
            ))
            .await?;
        let row = tx
            .query_one(&stmt, &[
                &id,
                &req.category_id,
                &req.brand_id,
                &req.author_id,
                &req.name,
                &req.model_name,
                &req.search_string,
                &req.price,
                &req.num_product,
                &req.discount,
                &req.image_link,
                &req.is_super,
                &req.is_new,
                &req.is_active,
                &Utc::now(),
            ])
            .await?;
        let product = self.map_row(&row);

        tx.commit().await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare("DELETE FROM products WHERE id = $1")
            .await?;
        let rows = client.execute(&stmt, &[&id]).await?;

        if rows == 0 {
            return Err(ProductError::NotFound { product_id: id });
        }

        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        Product {
            id: row.get(0),
            category_id: row.get(1),
            brand_id: row.get(2),
            author_id: row.get(3),
            name: row.get(4),
            model_name: row.get(5),
            search_string: row.get(6),
            price: row.get(7),
            num_product: row.get(8),
            discount: row.get(9),
            image_link: row.get(10),
            is_super: row.get(11),
            is_new: row.get(12),
            is_active: row.get(13),
            date_created: row.get(14),
            updated_at: row.get(15),
        }
    }
}

#[async_trait]
impl ProductStore for ProductDao {
    #[instrument(skip(self))]
    async fn find_products(
        &self, selection: &ProductSelection,
    ) -> Result<Vec<Product>, ProductError> {
        let client = self.db.get_read_client().await?;

        let (where_clause, mut params) = selection_where(selection).build();
        let pagination = PaginationParams::new(
            selection.limit.and_then(|l| u64::try_from(l).ok()),
            u64::try_from(selection.offset).ok().filter(|o| *o > 0),
        );
        let sql = pagination.build_query_with_existing_params(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products{where_clause}"),
            LISTING_ORDER,
            &mut params,
        );

        let stmt = client.prepare(&sql).await?;
        let rows = client.query(&stmt, &param_refs(&params)).await?;
        let products = rows.iter().map(|row| self.map_row(row)).collect();

        Ok(products)
    }

    async fn find_product(&self, id: i64) -> Result<Product, ProductError> {
        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn child_category_ids(
        &self, parent_id: i64,
    ) -> Result<Vec<i64>, ProductError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare("SELECT id FROM categories WHERE parent_category_id = $1")
            .await?;
        let rows = client.query(&stmt, &[&parent_id]).await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn create_product(
        &self, product: NewProduct,
    ) -> Result<Product, ProductError> {
        self.create(product).await
    }

    async fn update_product(
        &self, id: i64, changes: ProductChanges,
    ) -> Result<Product, ProductError> {
        self.update(id, changes).await
    }

    async fn delete_product(&self, id: i64) -> Result<(), ProductError> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_only_selection() {
        let selection = ProductSelection {
            search: Some("lamp".into()),
            ..Default::default()
        };
        let (clause, params) = selection_where(&selection).build();
        assert_eq!(clause, " WHERE search_string LIKE $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn structural_selection() {
        let selection = ProductSelection {
            predicates: vec![
                ProductPredicate::CategoryIn(vec![10, 11]),
                ProductPredicate::Discounted,
                ProductPredicate::PriceAtMost(60),
            ],
            ..Default::default()
        };
        let (clause, params) = selection_where(&selection).build();
        assert_eq!(
            clause,
            " WHERE category_id = ANY($1) AND discount > 0 AND price <= $2"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn unrestricted_selection_has_no_where() {
        let (clause, _) = selection_where(&ProductSelection::all()).build();
        assert!(clause.is_empty());
    }
}
