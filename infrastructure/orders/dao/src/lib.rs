mod order_items;
mod orders;

pub use order_items::OrderItemDao;
pub use orders::OrderDao;
