use async_trait::async_trait;
use product_errors::ProductError;
use product_models::{NewProduct, Product, ProductChanges, ProductSelection};

/// Relational persistence for products, as the listing cache and the
/// mutation handlers see it.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products matching `selection`, newest first, windowed by its
    /// offset and limit.
    async fn find_products(
        &self, selection: &ProductSelection,
    ) -> Result<Vec<Product>, ProductError>;

    async fn find_product(&self, id: i64) -> Result<Product, ProductError>;

    /// Ids of the categories whose parent is `parent_id` (one level only).
    async fn child_category_ids(
        &self, parent_id: i64,
    ) -> Result<Vec<i64>, ProductError>;

    /// Fails with `CategoryNotFound`/`BrandNotFound` when a reference is
    /// dangling; nothing is written in that case.
    async fn create_product(
        &self, product: NewProduct,
    ) -> Result<Product, ProductError>;

    async fn update_product(
        &self, id: i64, changes: ProductChanges,
    ) -> Result<Product, ProductError>;

    async fn delete_product(&self, id: i64) -> Result<(), ProductError>;
}
