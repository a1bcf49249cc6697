use std::sync::Arc;

use product_cache::ProductCache;
use product_commands::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand,
};
use product_dao::ProductStore;
use product_errors::ProductError;
use product_responses::ProductResponse;
use tracing::{info, instrument};

// Every mutation commits to the store first and then flushes the cache. A
// failed flush is returned to the caller even though the write stands.

#[derive(Clone)]
pub struct CreateProductHandler {
    store: Arc<dyn ProductStore>,
    cache: ProductCache,
}

impl CreateProductHandler {
    pub fn new(store: Arc<dyn ProductStore>, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateProductCommand,
    ) -> Result<ProductResponse, ProductError> {
        command.validate().map_err(ProductError::validation)?;

        let product = self.store.create_product(command.into()).await?;
        info!(product_id = product.id, "Product created");

        self.cache.invalidate_all().await?;
        Ok(product.into())
    }
}

#[derive(Clone)]
pub struct UpdateProductHandler {
    store: Arc<dyn ProductStore>,
    cache: ProductCache,
}

impl UpdateProductHandler {
    pub fn new(store: Arc<dyn ProductStore>, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateProductCommand,
    ) -> Result<ProductResponse, ProductError> {
        command.validate().map_err(ProductError::validation)?;

        let product_id = command.product_id;
        let product =
            self.store.update_product(product_id, command.into()).await?;
        info!(product_id, "Product updated");

        self.cache.invalidate_all().await?;
        Ok(product.into())
    }
}

#[derive(Clone)]
pub struct DeleteProductHandler {
    store: Arc<dyn ProductStore>,
    cache: ProductCache,
}

impl DeleteProductHandler {
    pub fn new(store: Arc<dyn ProductStore>, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteProductCommand,
    ) -> Result<(), ProductError> {
        self.store.delete_product(command.product_id).await?;
        info!(product_id = command.product_id, "Product deleted");

        self.cache.invalidate_all().await
    }
}

/// Manual wholesale invalidation.
#[derive(Clone)]
pub struct ClearCacheHandler {
    cache: ProductCache,
}

impl ClearCacheHandler {
    pub fn new(cache: ProductCache) -> Self { Self { cache } }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<(), ProductError> {
        self.cache.invalidate_all().await
    }
}
