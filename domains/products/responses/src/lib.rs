use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
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
    pub date_created: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<product_models::Product> for ProductResponse {
    fn from(product: product_models::Product) -> Self {
        Self {
            id: product.id,
            category_id: product.category_id,
            brand_id: product.brand_id,
            author_id: product.author_id,
            name: product.name,
            model_name: product.model_name,
            search_string: product.search_string,
            price: product.price,
            num_product: product.num_product,
            discount: product.discount,
            image_link: product.image_link,
            is_super: product.is_super,
            is_new: product.is_new,
            is_active: product.is_active,
            date_created: product.date_created,
            updated_at: product.updated_at,
        }
    }
}
