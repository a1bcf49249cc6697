use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use common_errors::AppError;
use specification_commands::{
    CreateSpecificationCommand, DeleteProductSpecificationCommand,
    DeleteSpecificationCommand, ProductSpecificationCommand,
    UpdateSpecificationCommand,
};
use specification_handlers::{
    CategorySpecificationsHandler, CreateProductSpecificationHandler,
    CreateSpecificationHandler, DeleteProductSpecificationHandler,
    DeleteSpecificationHandler, GetProductSpecificationHandler,
    GetSpecificationHandler, ListProductSpecificationsHandler,
    ListSpecificationsHandler, ProductSpecificationValuesHandler,
    UpdateProductSpecificationHandler, UpdateSpecificationHandler,
};
use specification_models::{
    CategorySpecification, ProductSpecification, ProductSpecificationValue,
    Specification,
};
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct SpecificationServices {
    pub create_specification: CreateSpecificationHandler,
    pub update_specification: UpdateSpecificationHandler,
    pub delete_specification: DeleteSpecificationHandler,
    pub get_specification: GetSpecificationHandler,
    pub list_specifications: ListSpecificationsHandler,
    pub category_specifications: CategorySpecificationsHandler,

    pub create_product_specification: CreateProductSpecificationHandler,
    pub update_product_specification: UpdateProductSpecificationHandler,
    pub delete_product_specification: DeleteProductSpecificationHandler,
    pub get_product_specification: GetProductSpecificationHandler,
    pub list_product_specifications: ListProductSpecificationsHandler,
    pub product_specification_values: ProductSpecificationValuesHandler,
}

impl SpecificationServices {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            create_specification: CreateSpecificationHandler::new(db.clone()),
            update_specification: UpdateSpecificationHandler::new(db.clone()),
            delete_specification: DeleteSpecificationHandler::new(db.clone()),
            get_specification: GetSpecificationHandler::new(db.clone()),
            list_specifications: ListSpecificationsHandler::new(db.clone()),
            category_specifications: CategorySpecificationsHandler::new(
                db.clone(),
            ),
            create_product_specification:
                CreateProductSpecificationHandler::new(db.clone()),
            update_product_specification:
                UpdateProductSpecificationHandler::new(db.clone()),
            delete_product_specification:
                DeleteProductSpecificationHandler::new(db.clone()),
            get_product_specification: GetProductSpecificationHandler::new(
                db.clone(),
            ),
            list_product_specifications:
                ListProductSpecificationsHandler::new(db.clone()),
            product_specification_values:
                ProductSpecificationValuesHandler::new(db),
        }
    }
}

pub fn router(services: SpecificationServices) -> Router {
    Router::new()
        .route("/specifications", get(list_specifications))
        .route("/specifications/add", post(create_specification))
        .route(
            "/specifications/{id}",
            get(get_specification)
                .put(update_specification)
                .delete(delete_specification),
        )
        .route(
            "/categories/values/{category_id}",
            get(category_specifications),
        )
        .route(
            "/p_specification",
            get(list_product_specifications).post(create_product_specification),
        )
        .route(
            "/p_specification/{id}",
            get(get_product_specification)
                .put(update_product_specification)
                .delete(delete_product_specification),
        )
        .route(
            "/p_specification/values/{product_id}",
            get(product_specification_values),
        )
        .with_state(services)
}

#[utoipa::path(
    get,
    path = "/specifications",
    responses(
        (status = 200, description = "All specifications", body = Vec<Specification>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "specifications"
)]
#[instrument(skip_all)]
pub async fn list_specifications(
    State(services): State<SpecificationServices>,
) -> Result<Json<Vec<Specification>>, AppError> {
    Ok(Json(services.list_specifications.execute().await?))
}

#[utoipa::path(
    get,
    path = "/specifications/{id}",
    params(
        ("id" = i64, Path, description = "Specification ID")
    ),
    responses(
        (status = 200, description = "Specification found", body = Specification),
        (status = 404, description = "Specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "specifications"
)]
#[instrument(skip_all)]
pub async fn get_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
) -> Result<Json<Specification>, AppError> {
    Ok(Json(services.get_specification.execute(id).await?))
}

#[utoipa::path(
    post,
    path = "/specifications/add",
    request_body = CreateSpecificationCommand,
    responses(
        (status = 201, description = "Specification created", body = Specification),
        (status = 400, description = "Invalid data or unknown category", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "specifications"
)]
#[instrument(skip_all)]
pub async fn create_specification(
    State(services): State<SpecificationServices>,
    Json(command): Json<CreateSpecificationCommand>,
) -> Result<(StatusCode, Json<Specification>), AppError> {
    let result = services.create_specification.execute(command).await?;

    tracing::info!("Specification created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/specifications/{id}",
    request_body = UpdateSpecificationCommand,
    params(
        ("id" = i64, Path, description = "Specification ID")
    ),
    responses(
        (status = 200, description = "Specification updated", body = Specification),
        (status = 400, description = "Invalid data or unknown category", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "specifications"
)]
#[instrument(skip_all)]
pub async fn update_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
    Json(mut command): Json<UpdateSpecificationCommand>,
) -> Result<Json<Specification>, AppError> {
    command.specification_id = id;
    let result = services.update_specification.execute(command).await?;

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/specifications/{id}",
    params(
        ("id" = i64, Path, description = "Specification ID")
    ),
    responses(
        (status = 204, description = "Specification and its product values deleted"),
        (status = 404, description = "Specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "specifications"
)]
#[instrument(skip_all)]
pub async fn delete_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteSpecificationCommand {
        specification_id: id,
    };
    services.delete_specification.execute(command).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/categories/values/{category_id}",
    params(
        ("category_id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Specifications defined for the category", body = Vec<CategorySpecification>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn category_specifications(
    State(services): State<SpecificationServices>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<CategorySpecification>>, AppError> {
    Ok(Json(
        services.category_specifications.execute(category_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/p_specification",
    responses(
        (status = 200, description = "All product specifications", body = Vec<ProductSpecification>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn list_product_specifications(
    State(services): State<SpecificationServices>,
) -> Result<Json<Vec<ProductSpecification>>, AppError> {
    Ok(Json(services.list_product_specifications.execute().await?))
}

#[utoipa::path(
    get,
    path = "/p_specification/{id}",
    params(
        ("id" = i64, Path, description = "Product specification ID")
    ),
    responses(
        (status = 200, description = "Product specification found", body = ProductSpecification),
        (status = 404, description = "Product specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn get_product_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
) -> Result<Json<ProductSpecification>, AppError> {
    Ok(Json(services.get_product_specification.execute(id).await?))
}

#[utoipa::path(
    post,
    path = "/p_specification",
    request_body = ProductSpecificationCommand,
    responses(
        (status = 201, description = "Product specification created", body = ProductSpecification),
        (status = 400, description = "Invalid value, unknown product or specification", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn create_product_specification(
    State(services): State<SpecificationServices>,
    Json(command): Json<ProductSpecificationCommand>,
) -> Result<(StatusCode, Json<ProductSpecification>), AppError> {
    let result = services
        .create_product_specification
        .execute(command)
        .await?;

    tracing::info!("Product specification created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/p_specification/{id}",
    request_body = ProductSpecificationCommand,
    params(
        ("id" = i64, Path, description = "Product specification ID")
    ),
    responses(
        (status = 200, description = "Product specification replaced", body = ProductSpecification),
        (status = 400, description = "Invalid value, unknown product or specification", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Product specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn update_product_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
    Json(command): Json<ProductSpecificationCommand>,
) -> Result<Json<ProductSpecification>, AppError> {
    let result = services
        .update_product_specification
        .execute(id, command)
        .await?;

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/p_specification/{id}",
    params(
        ("id" = i64, Path, description = "Product specification ID")
    ),
    responses(
        (status = 204, description = "Product specification deleted"),
        (status = 404, description = "Product specification not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn delete_product_specification(
    State(services): State<SpecificationServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteProductSpecificationCommand {
        product_specification_id: id,
    };
    services.delete_product_specification.execute(command).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/p_specification/values/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "The product's specification values with names", body = Vec<ProductSpecificationValue>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "p_specification"
)]
#[instrument(skip_all)]
pub async fn product_specification_values(
    State(services): State<SpecificationServices>,
    Path(product_id): Path<i64>,
) -> Result<Json<Vec<ProductSpecificationValue>>, AppError> {
    Ok(Json(
        services
            .product_specification_values
            .execute(product_id)
            .await?,
    ))
}
