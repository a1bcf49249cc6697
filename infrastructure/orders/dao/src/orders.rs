use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use database_traits::dao::GenericDao;
use order_commands::CreateOrderCommand;
use order_errors::OrderError;
use order_models::{Order, OrderChanges, OrderItem, OrderWithItems};
use sql_connection::SqlConnect;
use tokio_postgres::Row;
use tracing::instrument;

use crate::order_items::{ORDER_ITEM_COLUMNS, map_item};

const ORDER_COLUMNS: &str = "id, user_id, name, surname, phone_number, \
                             total_price, status, payment_status, \
                             payment_method, created_at, updated_at";

#[derive(Clone)]
pub struct OrderDao {
    db: SqlConnect,
}

impl OrderDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// Every order with its items, newest first.
    #[instrument(skip(self))]
    pub async fn all_with_items(
        &self,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        let orders = self.all().await?;
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut items = self.items_of(&ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                order_items: items.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn find_with_items(
        &self, id: i64,
    ) -> Result<OrderWithItems, OrderError> {
        let order = self.find_by_id(id).await?;
        let mut items = self.items_of(&[id]).await?;

        Ok(OrderWithItems {
            order_items: items.remove(&id).unwrap_or_default(),
            order,
        })
    }

    async fn items_of(
        &self, order_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<OrderItem>>, OrderError> {
        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        if order_ids.is_empty() {
            return Ok(grouped);
        }

        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {ORDER_ITEM_COLUMNS} FROM order_items
                 WHERE order_id = ANY($1) ORDER BY id ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[&order_ids]).await?;

        for item in rows.iter().map(map_item) {
            grouped.entry(item.order_id).or_default().push(item);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl GenericDao for OrderDao {
    type CreateRequest = CreateOrderCommand;
    type Error = OrderError;
    type ID = i64;
    type Model = Order;
    type Response = Order;
    type UpdateRequest = OrderChanges;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first()
            .map(|row| self.map_row(row))
            .ok_or(OrderError::OrderNotFound { order_id: id })
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders
                 ORDER BY created_at DESC, id DESC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    /// New orders start `pending` and `unpaid`.
    #[instrument(skip(self))]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let now = Utc::now();
        let row = client
            .query_one(
                &format!(
                    "INSERT INTO orders (user_id, name, surname, \
                     phone_number, total_price, payment_method, created_at, \
                     updated_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                     RETURNING {ORDER_COLUMNS}"
                ),
                &[
                    &req.user_id,
                    &req.name.trim(),
                    &req.surname.trim(),
                    &req.phone_number,
                    &req.total_price,
                    &req.payment_method,
                    &now,
                ],
            )
            .await?;

        Ok(self.map_row(&row))
    }

    #[instrument(skip(self))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let row = client
            .query_opt(
                &format!(
                    "UPDATE orders SET
                         status = COALESCE($2, status),
                         payment_status = COALESCE($3, payment_status),
                         updated_at = $4
                     WHERE id = $1
                     RETURNING {ORDER_COLUMNS}"
                ),
                &[
                    &id,
                    &req.status.map(|s| s.as_str()),
                    &req.payment_status.map(|s| s.as_str()),
                    &Utc::now(),
                ],
            )
            .await?;

        row.map(|row| self.map_row(&row))
            .ok_or(OrderError::OrderNotFound { order_id: id })
    }

    /// Items go with the order (`ON DELETE CASCADE`).
    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let removed = client
            .execute("DELETE FROM orders WHERE id = $1", &[&id])
            .await?;

        if removed == 0 {
            return Err(OrderError::OrderNotFound { order_id: id });
        }
        Ok(())
    }

    fn map_row(&self, row: &Row) -> Self::Model {
        // CHECK constraints admit only known status names.
        Order {
            id: row.get(0),
            user_id: row.get(1),
            name: row.get(2),
            surname: row.get(3),
            phone_number: row.get(4),
            total_price: row.get(5),
            status: row.get::<_, &str>(6).parse().unwrap_or_default(),
            payment_status: row.get::<_, &str>(7).parse().unwrap_or_default(),
            payment_method: row.get(8),
            created_at: row.get(9),
            updated_at: row.get(10),
        }
    }
}
