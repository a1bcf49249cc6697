use serde::Deserialize;

use crate::Product;

/// Structural listing filters as they arrive on the query string.
///
/// `available` and `discount` are presence flags: only `Some(true)` restricts
/// the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilters {
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub available: Option<bool>,
    pub discount: Option<bool>,
    pub max_price: Option<i64>,
}

impl ProductFilters {
    /// True when no parameter would produce a predicate.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.brand_id.is_none()
            && self.available != Some(true)
            && self.discount != Some(true)
            && self.max_price.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPredicate {
    /// `category_id` is one of the ids (a category plus its direct children).
    CategoryIn(Vec<i64>),
    BrandEq(i64),
    /// `num_product > 0`
    InStock,
    /// `discount > 0`
    Discounted,
    PriceAtMost(i64),
}

impl ProductPredicate {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::CategoryIn(ids) => ids.contains(&product.category_id),
            Self::BrandEq(id) => product.brand_id == *id,
            Self::InStock => product.num_product > 0,
            Self::Discounted => product.discount > 0,
            Self::PriceAtMost(max) => product.price <= *max,
        }
    }
}

/// Everything a store needs to answer one listing query: the conjunction of
/// predicates, an optional literal substring of `search_string`, and the
/// window over the newest-first ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    pub predicates: Vec<ProductPredicate>,
    pub search: Option<String>,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl ProductSelection {
    /// Every product, unwindowed.
    pub fn all() -> Self { Self::default() }

    pub fn is_all(&self) -> bool { self == &Self::all() }

    pub fn matches(&self, product: &Product) -> bool {
        let searched = self
            .search
            .as_deref()
            .is_none_or(|term| product.search_string.contains(term));

        searched && self.predicates.iter().all(|p| p.matches(product))
    }
}

/// A blank or whitespace-only term is treated as no search at all.
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}
