use std::net::SocketAddr;

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use catalog_http::CatalogServices;
use order_http::OrderServices;
use product_http::{ProductServices, background_jobs::RefreshSchedule};
use redis_connection::{CacheProvider, connect_redis_db};
use specification_http::SpecificationServices;
use sql_connection::{
    SqlConnect, SqlMigrator, connect_postgres_db, connect_postgres_read_replica,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

mod config;

use config::{AppConfig, CacheBackendKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    info!("Initializing connection pools...");

    let pool = connect_postgres_db(&config.database).await?;
    info!("PostgreSQL primary connection pool initialized");

    if config.database.enable_read_write_split() {
        if let Err(e) = connect_postgres_read_replica(&config.database).await {
            warn!(
                "Failed to initialize read replica: {}. Continuing with \
                 primary only.",
                e
            );
        }
    }

    if config.run_migrations {
        SqlMigrator::new(pool).run_all_migrations().await?;
        info!("Database migrations applied");
    }

    match config.cache_backend {
        CacheBackendKind::Redis => {
            let redis_pool = connect_redis_db(&config.redis).await?;
            CacheProvider::init_redis_static(redis_pool);
            info!("Redis cache backend initialized");
        }
        CacheBackendKind::Memory => {
            CacheProvider::init_memory_static(config.memory.clone());
            info!("In-memory cache backend initialized");
        }
    }

    let db = SqlConnect::from_global();
    let cache = CacheProvider::shared();

    let product_services = ProductServices::new(
        db.clone(),
        cache.clone(),
        RefreshSchedule::new(config.refresh_hour, config.refresh_timezone),
    );
    let catalog_services = CatalogServices::new(db.clone(), cache);
    let specification_services = SpecificationServices::new(db.clone());
    let order_services = OrderServices::new(db);

    info!("Starting product cache refresh job...");
    product_services.cache_refresh.clone().start();

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(product_http::router(product_services))
        .merge(catalog_http::router(catalog_services))
        .merge(specification_http::router(specification_services))
        .merge(order_http::router(order_services))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Catalog server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        product_http::list_products,
        product_http::get_product,
        product_http::create_product,
        product_http::update_product,
        product_http::delete_product,
        product_http::clear_cache,
        product_http::refresh_cache,
        catalog_http::list_categories,
        catalog_http::list_parent_categories,
        catalog_http::get_category,
        catalog_http::create_category,
        catalog_http::create_child_category,
        catalog_http::update_category,
        catalog_http::delete_category,
        catalog_http::list_brands,
        catalog_http::get_brand,
        catalog_http::create_brand,
        catalog_http::update_brand,
        catalog_http::delete_brand,
        specification_http::list_specifications,
        specification_http::get_specification,
        specification_http::create_specification,
        specification_http::update_specification,
        specification_http::delete_specification,
        specification_http::category_specifications,
        specification_http::list_product_specifications,
        specification_http::get_product_specification,
        specification_http::create_product_specification,
        specification_http::update_product_specification,
        specification_http::delete_product_specification,
        specification_http::product_specification_values,
        order_http::list_orders,
        order_http::get_order,
        order_http::create_order,
        order_http::delete_order,
        order_http::update_order_status,
        order_http::update_order_payment,
        order_http::list_order_items,
        order_http::order_items_of_order,
        order_http::create_order_item
    ),
    components(
        schemas(
            product_responses::ProductResponse,
            product_commands::CreateProductCommand,
            product_commands::UpdateProductCommand,
            product_http::ProductListParams,
            product_http::CacheRefreshResponse,
            catalog_models::Category,
            catalog_models::Brand,
            catalog_commands::CreateCategoryCommand,
            catalog_commands::CreateChildCategoryCommand,
            catalog_commands::UpdateCategoryCommand,
            catalog_commands::CreateBrandCommand,
            catalog_commands::UpdateBrandCommand,
            specification_models::Specification,
            specification_models::ProductSpecification,
            specification_models::ProductSpecificationValue,
            specification_models::CategorySpecification,
            specification_commands::CreateSpecificationCommand,
            specification_commands::UpdateSpecificationCommand,
            specification_commands::ProductSpecificationCommand,
            order_models::Order,
            order_models::OrderItem,
            order_models::OrderWithItems,
            order_models::OrderStatus,
            order_models::PaymentStatus,
            order_commands::CreateOrderCommand,
            order_commands::UpdateOrderStatusCommand,
            order_commands::UpdateOrderPaymentCommand,
            order_commands::CreateOrderItemCommand,
            common_errors::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product listing and management"),
        (name = "cache", description = "Product listing cache maintenance"),
        (name = "categories", description = "Category management"),
        (name = "brands", description = "Brand management"),
        (name = "specifications", description = "Specifications defined per category"),
        (name = "p_specification", description = "Specification values of products"),
        (name = "orders", description = "Orders and their payment state"),
        (name = "order_items", description = "Order lines")
    ),
    info(
        title = "Catalog API",
        description = "Product catalog with a cached product listing, specifications and orders",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with connection pool status", body = String)
    ),
    tag = "health"
)]
async fn health_check(db: SqlConnect) -> impl IntoResponse {
    let (write_available, write_size, read_stats) = db.get_pool_status();

    let health_info = if let Some((read_available, read_size)) = read_stats {
        format!(
            "OK - Write Pool: {write_available}/{write_size} available, Read Pool: {read_available}/{read_size} available"
        )
    }
    else {
        format!(
            "OK - Single Pool: {write_available}/{write_size} available (Read replica not configured)"
        )
    };

    (StatusCode::OK, health_info)
}
