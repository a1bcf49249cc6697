use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
};
use common_errors::AppError;
use order_commands::{
    CreateOrderCommand, CreateOrderItemCommand, DeleteOrderCommand,
    UpdateOrderPaymentCommand, UpdateOrderStatusCommand,
};
use order_handlers::{
    CreateOrderHandler, CreateOrderItemHandler, DeleteOrderHandler,
    GetOrderHandler, ListOrderItemsHandler, ListOrdersHandler,
    OrderItemsOfOrderHandler, UpdateOrderPaymentHandler,
    UpdateOrderStatusHandler,
};
use order_models::{Order, OrderItem, OrderWithItems};
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct OrderServices {
    pub create_order: CreateOrderHandler,
    pub update_status: UpdateOrderStatusHandler,
    pub update_payment: UpdateOrderPaymentHandler,
    pub delete_order: DeleteOrderHandler,
    pub get_order: GetOrderHandler,
    pub list_orders: ListOrdersHandler,

    pub create_order_item: CreateOrderItemHandler,
    pub list_order_items: ListOrderItemsHandler,
    pub order_items_of_order: OrderItemsOfOrderHandler,
}

impl OrderServices {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            create_order: CreateOrderHandler::new(db.clone()),
            update_status: UpdateOrderStatusHandler::new(db.clone()),
            update_payment: UpdateOrderPaymentHandler::new(db.clone()),
            delete_order: DeleteOrderHandler::new(db.clone()),
            get_order: GetOrderHandler::new(db.clone()),
            list_orders: ListOrdersHandler::new(db.clone()),
            create_order_item: CreateOrderItemHandler::new(db.clone()),
            list_order_items: ListOrderItemsHandler::new(db.clone()),
            order_items_of_order: OrderItemsOfOrderHandler::new(db),
        }
    }
}

pub fn router(services: OrderServices) -> Router {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/add", post(create_order))
        .route("/orders/{id}", get(get_order).delete(delete_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/orders/{id}/payment", patch(update_order_payment))
        .route("/order_items", get(list_order_items))
        .route("/order_items/add", post(create_order_item))
        .route("/order_items/{order_id}", get(order_items_of_order))
        .with_state(services)
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders with their items, newest first", body = Vec<OrderWithItems>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn list_orders(
    State(services): State<OrderServices>,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    Ok(Json(services.list_orders.execute().await?))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its items", body = OrderWithItems),
        (status = 404, description = "Order not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn get_order(
    State(services): State<OrderServices>, Path(id): Path<i64>,
) -> Result<Json<OrderWithItems>, AppError> {
    Ok(Json(services.get_order.execute(id).await?))
}

#[utoipa::path(
    post,
    path = "/orders/add",
    request_body = CreateOrderCommand,
    responses(
        (status = 201, description = "Order created as pending and unpaid", body = Order),
        (status = 400, description = "Invalid data", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn create_order(
    State(services): State<OrderServices>,
    Json(command): Json<CreateOrderCommand>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let result = services.create_order.execute(command).await?;

    tracing::info!("Order created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order and its items deleted"),
        (status = 404, description = "Order not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn delete_order(
    State(services): State<OrderServices>, Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let command = DeleteOrderCommand { order_id: id };
    services.delete_order.execute(command).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    request_body = UpdateOrderStatusCommand,
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Status changed", body = Order),
        (status = 400, description = "Unknown status", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Order not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn update_order_status(
    State(services): State<OrderServices>, Path(id): Path<i64>,
    Json(command): Json<UpdateOrderStatusCommand>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(services.update_status.execute(id, command).await?))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/payment",
    request_body = UpdateOrderPaymentCommand,
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Payment status changed", body = Order),
        (status = 400, description = "Unknown payment status", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Order not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "orders"
)]
#[instrument(skip_all)]
pub async fn update_order_payment(
    State(services): State<OrderServices>, Path(id): Path<i64>,
    Json(command): Json<UpdateOrderPaymentCommand>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(services.update_payment.execute(id, command).await?))
}

#[utoipa::path(
    get,
    path = "/order_items",
    responses(
        (status = 200, description = "All order items", body = Vec<OrderItem>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "order_items"
)]
#[instrument(skip_all)]
pub async fn list_order_items(
    State(services): State<OrderServices>,
) -> Result<Json<Vec<OrderItem>>, AppError> {
    Ok(Json(services.list_order_items.execute().await?))
}

#[utoipa::path(
    get,
    path = "/order_items/{order_id}",
    params(
        ("order_id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Items of the order", body = Vec<OrderItem>),
        (status = 404, description = "Order not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "order_items"
)]
#[instrument(skip_all)]
pub async fn order_items_of_order(
    State(services): State<OrderServices>, Path(order_id): Path<i64>,
) -> Result<Json<Vec<OrderItem>>, AppError> {
    Ok(Json(services.order_items_of_order.execute(order_id).await?))
}

#[utoipa::path(
    post,
    path = "/order_items/add",
    request_body = CreateOrderItemCommand,
    responses(
        (status = 201, description = "Item added to the order", body = OrderItem),
        (status = 400, description = "Invalid data, unknown order or product", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "order_items"
)]
#[instrument(skip_all)]
pub async fn create_order_item(
    State(services): State<OrderServices>,
    Json(command): Json<CreateOrderItemCommand>,
) -> Result<(StatusCode, Json<OrderItem>), AppError> {
    let result = services.create_order_item.execute(command).await?;

    tracing::info!("Order item created: {}", result.id);

    Ok((StatusCode::CREATED, Json(result)))
}
