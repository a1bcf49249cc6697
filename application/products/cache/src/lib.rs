use std::sync::Arc;

use product_errors::ProductError;
use product_models::Product;
use redis_connection::HashCache;
use tracing::{debug, info, instrument};

pub mod codec;
pub mod keys;

pub use keys::{PRODUCT_KEY_PATTERN, product_key};

/// Product listing stored as one hash per product under `product:<id>`.
///
/// Not authoritative: it holds whatever result set was written last and is
/// emptied wholesale by [`ProductCache::invalidate_all`].
#[derive(Clone)]
pub struct ProductCache {
    cache: Arc<dyn HashCache>,
}

impl ProductCache {
    pub fn new(cache: Arc<dyn HashCache>) -> Self { Self { cache } }

    /// Every cached product, newest first. `None` when the namespace is
    /// empty.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Option<Vec<Product>>, ProductError> {
        let keys = self.cache.scan_keys(PRODUCT_KEY_PATTERN).await?;
        if keys.is_empty() {
            return Ok(None);
        }

        let mut products = Vec::with_capacity(keys.len());
        for key in &keys {
            let fields = self.cache.hget_all(key).await?;
            // flushed between SCAN and HGETALL
            if fields.is_empty() {
                continue;
            }
            products.push(codec::decode(&fields)?);
        }

        if products.is_empty() {
            return Ok(None);
        }

        products.sort_by(Product::newest_first);
        debug!(count = products.len(), "Loaded products from cache");
        Ok(Some(products))
    }

    /// Writes one entry per product, leaving other entries alone.
    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn fill(&self, products: &[Product]) -> Result<(), ProductError> {
        for product in products {
            self.cache
                .hset_all(&product_key(product.id), &codec::encode(product))
                .await?;
        }
        Ok(())
    }

    /// Drops every product entry, then writes exactly `products`.
    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn replace(
        &self, products: &[Product],
    ) -> Result<(), ProductError> {
        let stale = self.cache.scan_keys(PRODUCT_KEY_PATTERN).await?;
        let removed = self.cache.delete_keys(&stale).await?;
        debug!(removed, "Dropped previous product entries");

        self.fill(products).await
    }

    /// Clears the whole cache database, product entries and anything
    /// co-located with them.
    #[instrument(skip(self))]
    pub async fn invalidate_all(&self) -> Result<(), ProductError> {
        self.cache.flush_all().await?;
        info!("Product cache invalidated");
        Ok(())
    }
}
