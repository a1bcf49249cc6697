use product_models::{Pagination, ProductFilters};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ListProductsQuery {
    pub filters: ProductFilters,
    pub search_query: Option<String>,
    pub pagination: Pagination,
}

impl ListProductsQuery {
    pub fn unfiltered() -> Self { Self::default() }
}

#[derive(Debug, Deserialize)]
pub struct GetProductQuery {
    pub product_id: i64,
}
