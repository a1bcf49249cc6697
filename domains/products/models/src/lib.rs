use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod filters;
mod pagination;

pub use filters::{
    ProductFilters, ProductPredicate, ProductSelection, normalize_search,
};
pub use pagination::{MAX_PAGE_SIZE, Pagination, PaginationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub brand_id: i64,
    pub author_id: i64,
    pub name: String,
    pub model_name: String,
    pub search_string: String,
    /// Minor currency units.
    pub price: i64,
    pub num_product: i32,
    pub discount: i32,
    pub image_link: String,
    pub is_super: bool,
    pub is_new: bool,
    pub is_active: bool,
    pub date_created: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Listing order: newest first, ties broken by the higher id.
    pub fn newest_first(a: &Product, b: &Product) -> Ordering {
        b.date_created
            .cmp(&a.date_created)
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Fields of a product that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category_id: i64,
    pub brand_id: i64,
    pub author_id: i64,
    pub name: String,
    pub model_name: String,
    pub search_string: String,
    pub price: i64,
    pub num_product: i32,
    pub discount: i32,
    pub image_link: String,
    pub is_super: bool,
    pub is_new: bool,
    pub is_active: bool,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub author_id: Option<i64>,
    pub name: Option<String>,
    pub model_name: Option<String>,
    pub search_string: Option<String>,
    pub price: Option<i64>,
    pub num_product: Option<i32>,
    pub discount: Option<i32>,
    pub image_link: Option<String>,
    pub is_super: Option<bool>,
    pub is_new: Option<bool>,
    pub is_active: Option<bool>,
}

impl ProductChanges {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.category_id {
            product.category_id = v;
        }
        if let Some(v) = self.brand_id {
            product.brand_id = v;
        }
        if let Some(v) = self.author_id {
            product.author_id = v;
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.model_name {
            product.model_name = v;
        }
        if let Some(v) = self.search_string {
            product.search_string = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.num_product {
            product.num_product = v;
        }
        if let Some(v) = self.discount {
            product.discount = v;
        }
        if let Some(v) = self.image_link {
            product.image_link = v;
        }
        if let Some(v) = self.is_super {
            product.is_super = v;
        }
        if let Some(v) = self.is_new {
            product.is_new = v;
        }
        if let Some(v) = self.is_active {
            product.is_active = v;
        }
    }
}
