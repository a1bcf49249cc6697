mod order_items;
mod orders;

pub use order_items::{
    CreateOrderItemHandler, ListOrderItemsHandler, OrderItemsOfOrderHandler,
};
pub use orders::{
    CreateOrderHandler, DeleteOrderHandler, GetOrderHandler, ListOrdersHandler,
    UpdateOrderPaymentHandler, UpdateOrderStatusHandler,
};
