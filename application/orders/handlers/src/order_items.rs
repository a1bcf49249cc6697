use order_commands::CreateOrderItemCommand;
use order_dao::OrderItemDao;
use order_errors::OrderError;
use order_models::OrderItem;
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListOrderItemsHandler {
    item_dao: OrderItemDao,
}

impl ListOrderItemsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            item_dao: OrderItemDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<OrderItem>, OrderError> {
        self.item_dao.all().await
    }
}

#[derive(Clone)]
pub struct OrderItemsOfOrderHandler {
    item_dao: OrderItemDao,
}

impl OrderItemsOfOrderHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            item_dao: OrderItemDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, order_id: i64,
    ) -> Result<Vec<OrderItem>, OrderError> {
        self.item_dao.for_order(order_id).await
    }
}

#[derive(Clone)]
pub struct CreateOrderItemHandler {
    item_dao: OrderItemDao,
}

impl CreateOrderItemHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            item_dao: OrderItemDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateOrderItemCommand,
    ) -> Result<OrderItem, OrderError> {
        command.validate().map_err(OrderError::validation)?;

        let item = self.item_dao.create(command).await?;
        info!(
            order_item_id = item.id,
            order_id = item.order_id,
            "Order item added"
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unreachable_db;

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_the_store() {
        let handler = CreateOrderItemHandler::new(unreachable_db());

        let err = handler
            .execute(CreateOrderItemCommand {
                order_id: 1,
                product_id: 1,
                quantity: 0,
                price_at_purchase: 10,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Validation {
            field: "quantity",
            ..
        }));
    }
}
