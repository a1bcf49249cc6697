use database_traits::dao::GenericDao;
use order_commands::{
    CreateOrderCommand, DeleteOrderCommand, UpdateOrderPaymentCommand,
    UpdateOrderStatusCommand,
};
use order_dao::OrderDao;
use order_errors::OrderError;
use order_models::{Order, OrderWithItems};
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListOrdersHandler {
    order_dao: OrderDao,
}

impl ListOrdersHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<OrderWithItems>, OrderError> {
        self.order_dao.all_with_items().await
    }
}

#[derive(Clone)]
pub struct GetOrderHandler {
    order_dao: OrderDao,
}

impl GetOrderHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, order_id: i64,
    ) -> Result<OrderWithItems, OrderError> {
        self.order_dao.find_with_items(order_id).await
    }
}

#[derive(Clone)]
pub struct CreateOrderHandler {
    order_dao: OrderDao,
}

impl CreateOrderHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self, command), fields(total_price = command.total_price))]
    pub async fn execute(
        &self, command: CreateOrderCommand,
    ) -> Result<Order, OrderError> {
        command.validate().map_err(OrderError::validation)?;

        let order = self.order_dao.create(command).await?;
        info!(order_id = order.id, "Order created");
        Ok(order)
    }
}

#[derive(Clone)]
pub struct UpdateOrderStatusHandler {
    order_dao: OrderDao,
}

impl UpdateOrderStatusHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, order_id: i64, command: UpdateOrderStatusCommand,
    ) -> Result<Order, OrderError> {
        let changes = command.changes()?;

        let order = self.order_dao.update(order_id, changes).await?;
        info!(order_id, status = %order.status, "Order status changed");
        Ok(order)
    }
}

#[derive(Clone)]
pub struct UpdateOrderPaymentHandler {
    order_dao: OrderDao,
}

impl UpdateOrderPaymentHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, order_id: i64, command: UpdateOrderPaymentCommand,
    ) -> Result<Order, OrderError> {
        let changes = command.changes()?;

        let order = self.order_dao.update(order_id, changes).await?;
        info!(
            order_id,
            payment_status = %order.payment_status,
            "Order payment status changed"
        );
        Ok(order)
    }
}

#[derive(Clone)]
pub struct DeleteOrderHandler {
    order_dao: OrderDao,
}

impl DeleteOrderHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            order_dao: OrderDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteOrderCommand,
    ) -> Result<(), OrderError> {
        self.order_dao.delete(command.order_id).await?;
        info!(order_id = command.order_id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unreachable_db;

    #[tokio::test]
    async fn unknown_status_is_rejected_before_the_store() {
        let handler = UpdateOrderStatusHandler::new(unreachable_db());

        let err = handler
            .execute(1, UpdateOrderStatusCommand {
                status: "teleported".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn invalid_order_is_rejected_before_the_store() {
        let handler = CreateOrderHandler::new(unreachable_db());

        let err = handler
            .execute(CreateOrderCommand {
                user_id: None,
                name: "Rauf".into(),
                surname: "Aliyev".into(),
                phone_number: "call me".into(),
                total_price: 100,
                payment_method: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Validation {
            field: "phone_number",
            ..
        }));
    }

    #[tokio::test]
    async fn known_payment_status_reaches_the_store() {
        let handler = UpdateOrderPaymentHandler::new(unreachable_db());

        let err = handler
            .execute(1, UpdateOrderPaymentCommand {
                payment_status: "refunded".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::DatabasePool(_)));
    }
}
