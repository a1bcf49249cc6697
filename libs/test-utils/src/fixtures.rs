use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use product_models::{NewProduct, Product};

/// Fixed reference instant; fixture `n` is created `n` minutes after it.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Product created `id` minutes after [`epoch`], so higher ids are newer.
pub fn product(id: i64, category_id: i64, price: i64, stock: i32) -> Product {
    let created = (epoch() + Duration::minutes(id)).trunc_subsecs(6);
    Product {
        id,
        category_id,
        brand_id: 1,
        author_id: 1,
        name: format!("Product {id}"),
        model_name: format!("MDL-{id}"),
        search_string: format!("product {id}"),
        price,
        num_product: stock,
        discount: 0,
        image_link: format!("https://img.example.com/{id}.png"),
        is_super: false,
        is_new: false,
        is_active: true,
        date_created: created,
        updated_at: created,
    }
}

pub fn new_product(category_id: i64, brand_id: i64) -> NewProduct {
    NewProduct {
        category_id,
        brand_id,
        author_id: 1,
        name: "Cast iron pan".into(),
        model_name: "CIP-28".into(),
        search_string: "cast iron pan 28cm".into(),
        price: 4_500,
        num_product: 12,
        discount: 0,
        image_link: "https://img.example.com/pan.png".into(),
        is_super: false,
        is_new: true,
        is_active: true,
    }
}
