use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Duration, SubsecRound, Utc};
use product_dao::ProductStore;
use product_errors::ProductError;
use product_models::{NewProduct, Product, ProductChanges, ProductSelection};
use sql_connection::PoolError;

#[derive(Default)]
struct State {
    products: Vec<Product>,
    /// category id -> parent id
    categories: HashMap<i64, Option<i64>>,
    brands: HashSet<i64>,
}

impl State {
    fn check_references(
        &self, category_id: Option<i64>, brand_id: Option<i64>,
    ) -> Result<(), ProductError> {
        if let Some(category_id) = category_id
            .filter(|id| !self.categories.contains_key(id))
        {
            return Err(ProductError::CategoryNotFound { category_id });
        }
        if let Some(brand_id) = brand_id.filter(|id| !self.brands.contains(id))
        {
            return Err(ProductError::BrandNotFound { brand_id });
        }
        Ok(())
    }
}

/// [`ProductStore`] over a vector, with the same ordering, windowing and
/// reference checks as the Postgres DAO. Counts listing queries and can be
/// told to fail the next ones.
#[derive(Default)]
pub struct InMemoryProductStore {
    state: Mutex<State>,
    listing_queries: AtomicUsize,
    pending_failures: AtomicUsize,
}

impl InMemoryProductStore {
    pub fn new() -> Self { Self::default() }

    /// Seeds products, registering their categories (top-level) and brands.
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        for product in products {
            store.insert(product);
        }
        store
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_category(&self, id: i64, parent: Option<i64>) {
        self.state().categories.insert(id, parent);
    }

    pub fn add_brand(&self, id: i64) { self.state().brands.insert(id); }

    pub fn insert(&self, product: Product) {
        let mut state = self.state();
        state.categories.entry(product.category_id).or_insert(None);
        state.brands.insert(product.brand_id);
        state.products.retain(|p| p.id != product.id);
        state.products.push(product);
    }

    pub fn products(&self) -> Vec<Product> {
        let mut products = self.state().products.clone();
        products.sort_by(Product::newest_first);
        products
    }

    /// Number of `find_products` calls so far, failed ones included.
    pub fn listing_queries(&self) -> usize {
        self.listing_queries.load(Ordering::SeqCst)
    }

    pub fn fail_next_queries(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    fn take_failure(&self) -> bool {
        self.pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            })
            .is_ok()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_products(
        &self, selection: &ProductSelection,
    ) -> Result<Vec<Product>, ProductError> {
        self.listing_queries.fetch_add(1, Ordering::SeqCst);
        if self.take_failure() {
            return Err(ProductError::DatabasePool(PoolError::Closed));
        }

        let offset = usize::try_from(selection.offset.max(0)).unwrap_or(usize::MAX);
        let limit = selection
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(self
            .products()
            .into_iter()
            .filter(|p| selection.matches(p))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn find_product(&self, id: i64) -> Result<Product, ProductError> {
        self.state()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductError::NotFound { product_id: id })
    }

    async fn child_category_ids(
        &self, parent_id: i64,
    ) -> Result<Vec<i64>, ProductError> {
        let mut ids: Vec<i64> = self
            .state()
            .categories
            .iter()
            .filter(|(_, parent)| **parent == Some(parent_id))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn create_product(
        &self, new: NewProduct,
    ) -> Result<Product, ProductError> {
        let mut state = self.state();
        state.check_references(Some(new.category_id), Some(new.brand_id))?;

        let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        // strictly newer than anything stored, at storage precision
        let latest = state.products.iter().map(|p| p.date_created).max();
        let now = Utc::now().trunc_subsecs(6);
        let created = match latest {
            Some(latest) if latest >= now => latest + Duration::microseconds(1),
            _ => now,
        };

        let product = Product {
            id,
            category_id: new.category_id,
            brand_id: new.brand_id,
            author_id: new.author_id,
            name: new.name,
            model_name: new.model_name,
            search_string: new.search_string,
            price: new.price,
            num_product: new.num_product,
            discount: new.discount,
            image_link: new.image_link,
            is_super: new.is_super,
            is_new: new.is_new,
            is_active: new.is_active,
            date_created: created,
            updated_at: created,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self, id: i64, changes: ProductChanges,
    ) -> Result<Product, ProductError> {
        let mut state = self.state();
        if !state.products.iter().any(|p| p.id == id) {
            return Err(ProductError::NotFound { product_id: id });
        }
        state.check_references(changes.category_id, changes.brand_id)?;

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound { product_id: id })?;
        changes.apply_to(product);
        product.updated_at = Utc::now().trunc_subsecs(6);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> Result<(), ProductError> {
        let mut state = self.state();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(ProductError::NotFound { product_id: id });
        }
        Ok(())
    }
}
