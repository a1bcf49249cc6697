use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use common_errors::AppError;
use product_cache::ProductCache;
use product_command_handlers::{
    ClearCacheHandler, CreateProductHandler, DeleteProductHandler,
    UpdateProductHandler,
};
use product_commands::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand,
};
use product_dao::{ProductDao, ProductStore};
use product_models::{Pagination, ProductFilters};
use product_queries::{GetProductQuery, ListProductsQuery};
use product_query_handlers::{GetProductQueryHandler, ListProductsQueryHandler};
use product_responses::ProductResponse;
use redis_connection::HashCache;
use serde::{Deserialize, Serialize};
use sql_connection::SqlConnect;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

pub mod background_jobs;

use background_jobs::{CacheRefreshJob, RefreshSchedule};

#[derive(Clone)]
pub struct ProductServices {
    pub create_product: CreateProductHandler,
    pub update_product: UpdateProductHandler,
    pub delete_product: DeleteProductHandler,
    pub clear_cache: ClearCacheHandler,

    pub list_products: ListProductsQueryHandler,
    pub get_product: GetProductQueryHandler,

    pub cache_refresh: CacheRefreshJob,
}

impl ProductServices {
    pub fn new(
        db: SqlConnect, cache: Arc<dyn HashCache>, schedule: RefreshSchedule,
    ) -> Self {
        Self::with_store(Arc::new(ProductDao::new(db)), cache, schedule)
    }

    pub fn with_store(
        store: Arc<dyn ProductStore>, cache: Arc<dyn HashCache>,
        schedule: RefreshSchedule,
    ) -> Self {
        let cache = ProductCache::new(cache);
        let list_products =
            ListProductsQueryHandler::new(store.clone(), cache.clone());

        Self {
            create_product: CreateProductHandler::new(
                store.clone(),
                cache.clone(),
            ),
            update_product: UpdateProductHandler::new(
                store.clone(),
                cache.clone(),
            ),
            delete_product: DeleteProductHandler::new(
                store.clone(),
                cache.clone(),
            ),
            clear_cache: ClearCacheHandler::new(cache),
            cache_refresh: CacheRefreshJob::new(list_products.clone(), schedule),
            list_products,
            get_product: GetProductQueryHandler::new(store),
        }
    }
}

pub fn router(services: ProductServices) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/add", post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/others/cache/clear", delete(clear_cache))
        .route("/others/cache/refresh", post(refresh_cache))
        .with_state(services)
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductListParams {
    /// Category; its direct children are included.
    category_id: Option<i64>,
    brand_id: Option<i64>,
    /// Only products in stock.
    available: Option<bool>,
    /// Only discounted products.
    discount: Option<bool>,
    max_price: Option<i64>,
    /// Substring of the search string; other filters are ignored.
    search_query: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl From<ProductListParams> for ListProductsQuery {
    fn from(params: ProductListParams) -> Self {
        Self {
            filters: ProductFilters {
                category_id: params.category_id,
                brand_id: params.brand_id,
                available: params.available,
                discount: params.discount,
                max_price: params.max_price,
            },
            search_query: params.search_query,
            pagination: Pagination {
                page: params.page,
                page_size: params.page_size,
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products, newest first", body = Vec<ProductResponse>),
        (status = 400, description = "Invalid pagination", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn list_products(
    State(services): State<ProductServices>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = services.list_products.execute(params.into()).await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn get_product(
    State(services): State<ProductServices>, Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    let query = GetProductQuery { product_id: id };
    let product = services.get_product.execute(query).await?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    post,
    path = "/products/add",
    request_body = CreateProductCommand,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid data or unknown category/brand", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn create_product(
    State(services): State<ProductServices>,
    Json(command): Json<CreateProductCommand>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let result = services.create_product.execute(command).await?;

    tracing::info!("Product created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    request_body = UpdateProductCommand,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid data or unknown category/brand", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Product not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn update_product(
    State(services): State<ProductServices>, Path(id): Path<i64>,
    Json(mut command): Json<UpdateProductCommand>,
) -> Result<Json<ProductResponse>, AppError> {
    command.product_id = id;
    let result = services.update_product.execute(command).await?;

    tracing::info!("Product updated: {}", id);

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn delete_product(
    State(services): State<ProductServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteProductCommand { product_id: id };
    services.delete_product.execute(command).await?;

    tracing::info!("Product deleted: {}", id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/others/cache/clear",
    responses(
        (status = 204, description = "Cache cleared"),
        (status = 500, description = "Cache unavailable", body = common_errors::ApiErrorResponse)
    ),
    tag = "cache"
)]
#[instrument(skip_all)]
pub async fn clear_cache(
    State(services): State<ProductServices>,
) -> Result<StatusCode, AppError> {
    services.clear_cache.execute().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CacheRefreshResponse {
    pub cached_products: usize,
}

#[utoipa::path(
    post,
    path = "/others/cache/refresh",
    responses(
        (status = 200, description = "Cache rebuilt from the store", body = CacheRefreshResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "cache"
)]
#[instrument(skip_all)]
pub async fn refresh_cache(
    State(services): State<ProductServices>,
) -> Result<Json<CacheRefreshResponse>, AppError> {
    let cached_products = services.cache_refresh.trigger().await?;

    Ok(Json(CacheRefreshResponse { cached_products }))
}
