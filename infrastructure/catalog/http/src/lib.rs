use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use catalog_commands::{
    CreateBrandCommand, CreateCategoryCommand, CreateChildCategoryCommand,
    DeleteBrandCommand, DeleteCategoryCommand, UpdateBrandCommand,
    UpdateCategoryCommand,
};
use catalog_handlers::{
    CreateBrandHandler, CreateCategoryHandler, DeleteBrandHandler,
    DeleteCategoryHandler, GetBrandHandler, GetCategoryHandler,
    ListBrandsHandler, ListCategoriesHandler, ListParentCategoriesHandler,
    UpdateBrandHandler, UpdateCategoryHandler,
};
use catalog_models::{Brand, Category};
use common_errors::AppError;
use product_cache::ProductCache;
use redis_connection::HashCache;
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct CatalogServices {
    pub create_category: CreateCategoryHandler,
    pub update_category: UpdateCategoryHandler,
    pub delete_category: DeleteCategoryHandler,
    pub get_category: GetCategoryHandler,
    pub list_categories: ListCategoriesHandler,
    pub list_parent_categories: ListParentCategoriesHandler,

    pub create_brand: CreateBrandHandler,
    pub update_brand: UpdateBrandHandler,
    pub delete_brand: DeleteBrandHandler,
    pub get_brand: GetBrandHandler,
    pub list_brands: ListBrandsHandler,
}

impl CatalogServices {
    pub fn new(db: SqlConnect, cache: Arc<dyn HashCache>) -> Self {
        Self {
            create_category: CreateCategoryHandler::new(db.clone()),
            update_category: UpdateCategoryHandler::new(db.clone()),
            delete_category: DeleteCategoryHandler::new(
                db.clone(),
                ProductCache::new(cache),
            ),
            get_category: GetCategoryHandler::new(db.clone()),
            list_categories: ListCategoriesHandler::new(db.clone()),
            list_parent_categories: ListParentCategoriesHandler::new(
                db.clone(),
            ),
            create_brand: CreateBrandHandler::new(db.clone()),
            update_brand: UpdateBrandHandler::new(db.clone()),
            delete_brand: DeleteBrandHandler::new(db.clone()),
            get_brand: GetBrandHandler::new(db.clone()),
            list_brands: ListBrandsHandler::new(db),
        }
    }
}

pub fn router(services: CatalogServices) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/parent", get(list_parent_categories))
        .route("/categories/add", post(create_category))
        .route("/categories/child/add", post(create_child_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/brands", get(list_brands))
        .route("/brands/add", post(create_brand))
        .route(
            "/brands/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .with_state(services)
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories, newest first", body = Vec<Category>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn list_categories(
    State(services): State<CatalogServices>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(services.list_categories.execute().await?))
}

#[utoipa::path(
    get,
    path = "/categories/parent",
    responses(
        (status = 200, description = "Top-level categories", body = Vec<Category>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn list_parent_categories(
    State(services): State<CatalogServices>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(services.list_parent_categories.execute().await?))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn get_category(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(services.get_category.execute(id).await?))
}

#[utoipa::path(
    post,
    path = "/categories/add",
    request_body = CreateCategoryCommand,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid data or duplicate name", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn create_category(
    State(services): State<CatalogServices>,
    Json(command): Json<CreateCategoryCommand>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let result = services.create_category.execute(command).await?;

    tracing::info!("Category created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    post,
    path = "/categories/child/add",
    request_body = CreateChildCategoryCommand,
    responses(
        (status = 201, description = "Child category created", body = Category),
        (status = 400, description = "Invalid data, duplicate name or unknown parent", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn create_child_category(
    State(services): State<CatalogServices>,
    Json(command): Json<CreateChildCategoryCommand>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let result = services.create_category.execute_child(command).await?;

    tracing::info!("Child category created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    request_body = UpdateCategoryCommand,
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid data or duplicate name", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn update_category(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
    Json(mut command): Json<UpdateCategoryCommand>,
) -> Result<Json<Category>, AppError> {
    command.category_id = id;
    let result = services.update_category.execute(command).await?;

    tracing::info!("Category updated: {}", id);

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category and its products deleted"),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn delete_category(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteCategoryCommand { category_id: id };
    services.delete_category.execute(command).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/brands",
    responses(
        (status = 200, description = "Brands by name", body = Vec<Brand>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "brands"
)]
#[instrument(skip_all)]
pub async fn list_brands(
    State(services): State<CatalogServices>,
) -> Result<Json<Vec<Brand>>, AppError> {
    Ok(Json(services.list_brands.execute().await?))
}

#[utoipa::path(
    get,
    path = "/brands/{id}",
    params(
        ("id" = i64, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 404, description = "Brand not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "brands"
)]
#[instrument(skip_all)]
pub async fn get_brand(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
) -> Result<Json<Brand>, AppError> {
    Ok(Json(services.get_brand.execute(id).await?))
}

#[utoipa::path(
    post,
    path = "/brands/add",
    request_body = CreateBrandCommand,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, description = "Invalid data or duplicate name", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "brands"
)]
#[instrument(skip_all)]
pub async fn create_brand(
    State(services): State<CatalogServices>,
    Json(command): Json<CreateBrandCommand>,
) -> Result<(StatusCode, Json<Brand>), AppError> {
    let result = services.create_brand.execute(command).await?;

    tracing::info!("Brand created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/brands/{id}",
    request_body = UpdateBrandCommand,
    params(
        ("id" = i64, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand updated", body = Brand),
        (status = 400, description = "Invalid data or duplicate name", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Brand not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "brands"
)]
#[instrument(skip_all)]
pub async fn update_brand(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
    Json(mut command): Json<UpdateBrandCommand>,
) -> Result<Json<Brand>, AppError> {
    command.brand_id = id;
    let result = services.update_brand.execute(command).await?;

    tracing::info!("Brand updated: {}", id);

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/brands/{id}",
    params(
        ("id" = i64, Path, description = "Brand ID")
    ),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 400, description = "Brand still has products", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Brand not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "brands"
)]
#[instrument(skip_all)]
pub async fn delete_brand(
    State(services): State<CatalogServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteBrandCommand { brand_id: id };
    services.delete_brand.execute(command).await?;

    tracing::info!("Brand deleted: {}", id);

    Ok(StatusCode::NO_CONTENT)
}
