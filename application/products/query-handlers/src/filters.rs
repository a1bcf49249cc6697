use product_dao::ProductStore;
use product_errors::ProductError;
use product_models::{
    ProductFilters, ProductPredicate, ProductSelection, normalize_search,
};
use product_queries::ListProductsQuery;

/// One predicate per restricting parameter. A category expands to itself
/// plus its direct children.
pub async fn build_filters(
    store: &dyn ProductStore, filters: &ProductFilters,
) -> Result<Vec<ProductPredicate>, ProductError> {
    let mut predicates = Vec::new();

    if let Some(category_id) = filters.category_id {
        let mut ids = vec![category_id];
        ids.extend(store.child_category_ids(category_id).await?);
        predicates.push(ProductPredicate::CategoryIn(ids));
    }
    if let Some(brand_id) = filters.brand_id {
        predicates.push(ProductPredicate::BrandEq(brand_id));
    }
    if filters.available == Some(true) {
        predicates.push(ProductPredicate::InStock);
    }
    if filters.discount == Some(true) {
        predicates.push(ProductPredicate::Discounted);
    }
    if let Some(max_price) = filters.max_price {
        predicates.push(ProductPredicate::PriceAtMost(max_price));
    }

    Ok(predicates)
}

/// A search term replaces the structural filters entirely.
pub async fn build_selection(
    store: &dyn ProductStore, query: &ListProductsQuery,
) -> Result<ProductSelection, ProductError> {
    let search = normalize_search(query.search_query.as_deref());
    let predicates = match search {
        Some(_) => Vec::new(),
        None => build_filters(store, &query.filters).await?,
    };

    Ok(ProductSelection {
        predicates,
        search,
        offset: query.pagination.offset(),
        limit: query.pagination.limit(),
    })
}

/// No restricting filter, no search term and no pagination.
pub fn is_unfiltered(query: &ListProductsQuery) -> bool {
    query.filters.is_empty()
        && normalize_search(query.search_query.as_deref()).is_none()
        && !query.pagination.is_requested()
}
