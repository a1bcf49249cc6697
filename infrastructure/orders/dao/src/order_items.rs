use chrono::Utc;
use order_commands::CreateOrderItemCommand;
use order_errors::OrderError;
use order_models::OrderItem;
use sql_connection::SqlConnect;
use tokio_postgres::{Row, Transaction};
use tracing::instrument;

pub(crate) const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, product_id, quantity, price_at_purchase";

pub(crate) fn map_item(row: &Row) -> OrderItem {
    OrderItem {
        id: row.get(0),
        order_id: row.get(1),
        product_id: row.get(2),
        quantity: row.get(3),
        price_at_purchase: row.get(4),
    }
}

/// Order lines. Items are only ever added; they go away with their order.
#[derive(Clone)]
pub struct OrderItemDao {
    db: SqlConnect,
}

impl OrderItemDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<OrderItem>, OrderError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {ORDER_ITEM_COLUMNS} FROM order_items ORDER BY id ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(map_item).collect())
    }

    /// Items of one order; a missing order is not found, an order without
    /// items yields an empty list.
    #[instrument(skip(self))]
    pub async fn for_order(
        &self, order_id: i64,
    ) -> Result<Vec<OrderItem>, OrderError> {
        let client = self.db.get_read_client().await?;
        let order = client
            .query_opt("SELECT 1 FROM orders WHERE id = $1", &[&order_id])
            .await?;
        if order.is_none() {
            return Err(OrderError::OrderNotFound { order_id });
        }

        let stmt = client
            .prepare(&format!(
                "SELECT {ORDER_ITEM_COLUMNS} FROM order_items
                 WHERE order_id = $1 ORDER BY id ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[&order_id]).await?;

        Ok(rows.iter().map(map_item).collect())
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self, req: CreateOrderItemCommand,
    ) -> Result<OrderItem, OrderError> {
        let mut client = self.db.get_client().await?;
        let tx = client.transaction().await?;

        Self::ensure_references(&tx, &req).await?;

        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO order_items (order_id, product_id, quantity, \
                     price_at_purchase)
                     VALUES ($1, $2, $3, $4)
                     RETURNING {ORDER_ITEM_COLUMNS}"
                ),
                &[
                    &req.order_id,
                    &req.product_id,
                    &req.quantity,
                    &req.price_at_purchase,
                ],
            )
            .await?;
        let item = map_item(&row);

        tx.execute("UPDATE orders SET updated_at = $2 WHERE id = $1", &[
            &req.order_id,
            &Utc::now(),
        ])
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    async fn ensure_references(
        tx: &Transaction<'_>, req: &CreateOrderItemCommand,
    ) -> Result<(), OrderError> {
        let order = tx
            .query_opt("SELECT 1 FROM orders WHERE id = $1 FOR UPDATE", &[
                &req.order_id,
            ])
            .await?;
        if order.is_none() {
            return Err(OrderError::UnknownOrder {
                order_id: req.order_id,
            });
        }

        let product = tx
            .query_opt("SELECT 1 FROM products WHERE id = $1 FOR SHARE", &[
                &req.product_id,
            ])
            .await?;
        if product.is_none() {
            return Err(OrderError::UnknownProduct {
                product_id: req.product_id,
            });
        }
        Ok(())
    }
}
