use std::sync::Arc;

use product_cache::ProductCache;
use product_dao::ProductStore;
use product_errors::ProductError;
use product_models::{Product, ProductSelection};
use product_queries::{GetProductQuery, ListProductsQuery};
use tracing::{debug, info, instrument, warn};

mod filters;

pub use filters::{build_filters, build_selection, is_unfiltered};

/// Read-through product listing.
///
/// Unfiltered requests are answered from the cache when it holds anything
/// and fill it otherwise. Filtered, searched or paginated requests always go
/// to the store and leave exactly their result set in the cache.
#[derive(Clone)]
pub struct ListProductsQueryHandler {
    store: Arc<dyn ProductStore>,
    cache: ProductCache,
}

impl ListProductsQueryHandler {
    pub fn new(store: Arc<dyn ProductStore>, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    /// Lists products through the cache.
    ///
    /// When the cached path fails, the cache is flushed best effort and the
    /// listing is retried once against the store. That retry reads the store
    /// directly and writes nothing to the cache, so the next unfiltered read
    /// repopulates it. A second failure is returned to the caller.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListProductsQuery,
    ) -> Result<Vec<Product>, ProductError> {
        query.pagination.validate()?;

        match self.cached_listing(&query).await {
            Ok(products) => Ok(products),
            Err(err) => {
                warn!(
                    error = %err,
                    "Product listing failed, querying the store directly"
                );
                if let Err(flush_err) = self.cache.invalidate_all().await {
                    warn!(error = %flush_err, "Cache flush before fallback failed");
                }

                let selection =
                    build_selection(self.store.as_ref(), &query).await?;
                self.store.find_products(&selection).await
            }
        }
    }

    async fn cached_listing(
        &self, query: &ListProductsQuery,
    ) -> Result<Vec<Product>, ProductError> {
        if is_unfiltered(query) {
            if let Some(products) = self.cache.load_all().await? {
                debug!(count = products.len(), "Product listing cache hit");
                return Ok(products);
            }

            debug!("Cache miss for product listing, querying store");
            let products =
                self.store.find_products(&ProductSelection::all()).await?;
            self.cache.fill(&products).await?;
            return Ok(products);
        }

        debug!("Filtered product listing, bypassing cache");
        let selection = build_selection(self.store.as_ref(), query).await?;
        let products = self.store.find_products(&selection).await?;
        self.cache.replace(&products).await?;
        Ok(products)
    }

    /// Flushes the cache and refills it with the full catalog. Returns the
    /// number of products cached.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize, ProductError> {
        self.cache.invalidate_all().await?;
        let products =
            self.store.find_products(&ProductSelection::all()).await?;
        self.cache.fill(&products).await?;

        info!(count = products.len(), "Product cache refreshed");
        Ok(products.len())
    }
}

#[derive(Clone)]
pub struct GetProductQueryHandler {
    store: Arc<dyn ProductStore>,
}

impl GetProductQueryHandler {
    pub fn new(store: Arc<dyn ProductStore>) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetProductQuery,
    ) -> Result<Product, ProductError> {
        self.store.find_product(query.product_id).await
    }
}

#[cfg(test)]
mod tests {
    use product_models::{Pagination, ProductFilters};
    use redis_connection::{HashCache, Memory};
    use test_utils::{FailingCache, InMemoryProductStore, fixtures::product};

    use super::*;

    struct Harness {
        store: Arc<InMemoryProductStore>,
        memory: Arc<Memory>,
        handler: ListProductsQueryHandler,
    }

    fn harness(products: Vec<Product>) -> Harness {
        let store = Arc::new(InMemoryProductStore::with_products(products));
        let memory = Arc::new(Memory::default());
        let handler = ListProductsQueryHandler::new(
            store.clone(),
            ProductCache::new(memory.clone()),
        );
        Harness {
            store,
            memory,
            handler,
        }
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    fn filtered(filters: ProductFilters) -> ListProductsQuery {
        ListProductsQuery {
            filters,
            ..Default::default()
        }
    }

    async fn cached_keys(memory: &Memory) -> Vec<String> {
        let mut keys = memory.scan_keys("product:*").await.unwrap();
        keys.sort();
        keys
    }

    #[tokio::test]
    async fn availability_and_price_scenario() {
        let h = harness(vec![product(1, 10, 100, 0), product(2, 10, 50, 5)]);

        let available = h
            .handler
            .execute(filtered(ProductFilters {
                available: Some(true),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&available), vec![2]);

        let cheap = h
            .handler
            .execute(filtered(ProductFilters {
                max_price: Some(60),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&cheap), vec![2]);
    }

    #[tokio::test]
    async fn repeated_unfiltered_listing_is_served_from_cache() {
        let h = harness((1..=4).map(|id| product(id, 1, 10, 1)).collect());

        let first = h.handler.execute(ListProductsQuery::unfiltered()).await;
        let second = h.handler.execute(ListProductsQuery::unfiltered()).await;

        assert_eq!(ids(&first.unwrap()), vec![4, 3, 2, 1]);
        assert_eq!(ids(&second.unwrap()), vec![4, 3, 2, 1]);
        assert_eq!(h.store.listing_queries(), 1);
        assert_eq!(cached_keys(&h.memory).await.len(), 4);
    }

    #[tokio::test]
    async fn cached_products_equal_stored_products() {
        let h = harness(vec![product(1, 1, 10, 1), product(2, 1, 20, 0)]);

        let from_store = h.handler.execute(ListProductsQuery::unfiltered()).await;
        let from_cache = h.handler.execute(ListProductsQuery::unfiltered()).await;

        assert_eq!(from_store.unwrap(), from_cache.unwrap());
    }

    #[tokio::test]
    async fn false_flags_still_use_the_cache() {
        let h = harness(vec![product(1, 1, 10, 0)]);
        let query = filtered(ProductFilters {
            available: Some(false),
            discount: Some(false),
            ..Default::default()
        });

        h.handler.execute(query.clone()).await.unwrap();
        let again = h.handler.execute(query).await.unwrap();

        assert_eq!(ids(&again), vec![1]);
        assert_eq!(h.store.listing_queries(), 1);
    }

    #[tokio::test]
    async fn category_filter_includes_direct_children_only() {
        let h = harness(vec![
            product(1, 10, 10, 1),
            product(2, 11, 10, 1),
            product(3, 12, 10, 1),
            product(4, 20, 10, 1),
        ]);
        h.store.add_category(11, Some(10));
        h.store.add_category(12, Some(11));

        let listed = h
            .handler
            .execute(filtered(ProductFilters {
                category_id: Some(10),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert_eq!(ids(&listed), vec![2, 1]);
    }

    #[tokio::test]
    async fn pagination_returns_the_matching_slice() {
        let h = harness((1..=7).map(|id| product(id, 1, 10, 1)).collect());
        let all = ids(&h.store.products());

        for page in 1..=4 {
            let query = ListProductsQuery {
                pagination: Pagination::new(page, 3),
                ..Default::default()
            };
            let listed = ids(&h.handler.execute(query).await.unwrap());

            let start = ((page - 1) * 3) as usize;
            let expected: Vec<i64> =
                all.iter().skip(start).take(3).copied().collect();
            assert!(listed.len() <= 3);
            assert_eq!(listed, expected);
        }
    }

    #[tokio::test]
    async fn invalid_pagination_is_rejected_before_any_access() {
        let h = harness(vec![product(1, 1, 10, 1)]);

        for pagination in [Pagination::new(0, 10), Pagination::new(1, 101)] {
            let query = ListProductsQuery {
                pagination,
                ..Default::default()
            };
            let err = h.handler.execute(query).await.unwrap_err();
            assert!(matches!(err, ProductError::InvalidPagination(_)));
        }
        assert_eq!(h.store.listing_queries(), 0);
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let h = harness((1..=3).map(|id| product(id, 1, 10, 1)).collect());
        let query = ListProductsQuery {
            pagination: Pagination::new(i64::MAX / 50, 100),
            ..Default::default()
        };

        let listed = h.handler.execute(query).await.unwrap();

        assert!(listed.is_empty());
        assert_eq!(h.store.listing_queries(), 1);
    }

    #[tokio::test]
    async fn search_matches_substring_and_ignores_filters() {
        let h = harness(vec![product(3, 10, 10, 1), product(31, 20, 10, 0)]);
        let query = ListProductsQuery {
            filters: ProductFilters {
                category_id: Some(99),
                available: Some(true),
                ..Default::default()
            },
            search_query: Some("product 3".into()),
            ..Default::default()
        };

        let listed = h.handler.execute(query).await.unwrap();
        assert_eq!(ids(&listed), vec![31, 3]);
    }

    #[tokio::test]
    async fn filtered_listing_leaves_exactly_its_result_in_cache() {
        let h = harness(vec![
            product(1, 10, 10, 1),
            product(2, 20, 10, 1),
            product(3, 30, 10, 1),
        ]);
        h.handler.execute(ListProductsQuery::unfiltered()).await.unwrap();

        h.handler
            .execute(filtered(ProductFilters {
                category_id: Some(20),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(cached_keys(&h.memory).await, vec!["product:2"]);

        h.handler
            .execute(filtered(ProductFilters {
                category_id: Some(30),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(cached_keys(&h.memory).await, vec!["product:3"]);

        // the next unfiltered read sees the subset until a flush
        let listed = h.handler.execute(ListProductsQuery::unfiltered()).await;
        assert_eq!(ids(&listed.unwrap()), vec![3]);
    }

    #[tokio::test]
    async fn invalidation_forces_a_store_query() {
        let h = harness(vec![product(1, 1, 10, 1)]);
        let cache = ProductCache::new(h.memory.clone());
        h.handler.execute(ListProductsQuery::unfiltered()).await.unwrap();

        h.store.insert(product(2, 1, 10, 1));
        cache.invalidate_all().await.unwrap();

        let listed = h.handler.execute(ListProductsQuery::unfiltered()).await;
        assert_eq!(ids(&listed.unwrap()), vec![2, 1]);
        assert_eq!(h.store.listing_queries(), 2);
    }

    #[tokio::test]
    async fn unavailable_cache_falls_back_to_the_store() {
        let store = Arc::new(InMemoryProductStore::with_products(vec![
            product(1, 1, 10, 1),
            product(2, 1, 10, 1),
        ]));
        let failing = Arc::new(FailingCache::new());
        let handler = ListProductsQueryHandler::new(
            store.clone(),
            ProductCache::new(failing.clone()),
        );

        let listed = handler.execute(ListProductsQuery::unfiltered()).await;

        assert_eq!(ids(&listed.unwrap()), vec![2, 1]);
        assert_eq!(failing.flush_attempts(), 1);
        assert_eq!(store.listing_queries(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_retried_once_without_cache_writes() {
        let h = harness(vec![product(1, 1, 10, 1), product(2, 2, 10, 1)]);
        h.memory
            .hset_all("product:999", &[("id".into(), "999".into())])
            .await
            .unwrap();
        h.store.fail_next_queries(1);

        let listed = h
            .handler
            .execute(filtered(ProductFilters {
                category_id: Some(2),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert_eq!(ids(&listed), vec![2]);
        assert_eq!(h.store.listing_queries(), 2);
        assert!(cached_keys(&h.memory).await.is_empty());
    }

    #[tokio::test]
    async fn second_store_failure_propagates() {
        let h = harness(vec![product(1, 1, 10, 1)]);
        h.store.fail_next_queries(2);

        let err = h
            .handler
            .execute(ListProductsQuery::unfiltered())
            .await
            .unwrap_err();

        assert!(err.is_infrastructure());
        assert_eq!(h.store.listing_queries(), 2);
    }

    #[tokio::test]
    async fn refresh_restores_the_full_catalog() {
        let h = harness((1..=3).map(|id| product(id, id, 10, 1)).collect());
        h.handler
            .execute(filtered(ProductFilters {
                category_id: Some(1),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(cached_keys(&h.memory).await.len(), 1);

        let cached = h.handler.refresh().await.unwrap();

        assert_eq!(cached, 3);
        assert_eq!(cached_keys(&h.memory).await.len(), 3);
    }

    #[tokio::test]
    async fn get_product_reports_missing_ids() {
        let store = Arc::new(InMemoryProductStore::with_products(vec![product(
            5, 1, 10, 1,
        )]));
        let handler = GetProductQueryHandler::new(store);

        let found = handler.execute(GetProductQuery { product_id: 5 }).await;
        assert_eq!(found.unwrap().id, 5);

        let missing = handler.execute(GetProductQuery { product_id: 6 }).await;
        assert!(matches!(missing, Err(ProductError::NotFound {
            product_id: 6
        })));
    }
}
