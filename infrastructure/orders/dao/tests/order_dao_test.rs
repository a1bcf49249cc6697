use database_traits::dao::GenericDao;
use order_commands::{CreateOrderCommand, CreateOrderItemCommand};
use order_dao::{OrderDao, OrderItemDao};
use order_errors::OrderError;
use order_models::{OrderChanges, OrderStatus, PaymentStatus};
use test_utils::TestPostgresContainer;

fn order(name: &str) -> CreateOrderCommand {
    CreateOrderCommand {
        user_id: None,
        name: name.into(),
        surname: "Aliyev".into(),
        phone_number: "+994501234567".into(),
        total_price: 7_500,
        payment_method: None,
    }
}

fn item(order_id: i64, product_id: i64, quantity: i32) -> CreateOrderItemCommand {
    CreateOrderItemCommand {
        order_id,
        product_id,
        quantity,
        price_at_purchase: 2_500,
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn orders_carry_their_items_and_statuses() -> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let kitchen = container.insert_category("Kitchen", None).await?;
    let brand = container.insert_brand("Ferro").await?;
    let kettle = container.insert_product(kitchen, brand, 2_500).await?;
    let orders = OrderDao::new(container.sql_connect());
    let items = OrderItemDao::new(container.sql_connect());

    let first = orders.create(order("Rauf")).await?;
    let second = orders.create(order("Leyla")).await?;
    assert_eq!(first.status, OrderStatus::Pending);
    assert_eq!(first.payment_status, PaymentStatus::Unpaid);

    items.create(item(first.id, kettle, 2)).await?;
    items.create(item(first.id, kettle, 1)).await?;

    let err = items.create(item(9_999, kettle, 1)).await.unwrap_err();
    assert!(matches!(err, OrderError::UnknownOrder { order_id: 9_999 }));
    let err = items.create(item(first.id, 9_999, 1)).await.unwrap_err();
    assert!(matches!(err, OrderError::UnknownProduct { .. }));

    let listed = orders.all_with_items().await?;
    let ids: Vec<i64> = listed.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(listed[0].order_items.is_empty());
    assert_eq!(listed[1].order_items.len(), 2);

    let shipped = orders
        .update(first.id, OrderChanges {
            status: Some(OrderStatus::Shipped),
            ..Default::default()
        })
        .await?;
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.payment_status, PaymentStatus::Unpaid);

    let paid = orders
        .update(first.id, OrderChanges {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        })
        .await?;
    assert_eq!(paid.status, OrderStatus::Shipped);
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let err = orders
        .update(9_999, OrderChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound { .. }));
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn deleting_orders_and_products_keeps_history_consistent()
-> anyhow::Result<()> {
    let container = TestPostgresContainer::new().await?;
    let kitchen = container.insert_category("Kitchen", None).await?;
    let brand = container.insert_brand("Ferro").await?;
    let kettle = container.insert_product(kitchen, brand, 2_500).await?;
    let orders = OrderDao::new(container.sql_connect());
    let items = OrderItemDao::new(container.sql_connect());

    let kept = orders.create(order("Rauf")).await?;
    let dropped = orders.create(order("Leyla")).await?;
    items.create(item(kept.id, kettle, 1)).await?;
    items.create(item(dropped.id, kettle, 1)).await?;
    items.create(item(dropped.id, kettle, 3)).await?;

    orders.delete(dropped.id).await?;
    assert_eq!(items.all().await?.len(), 1);
    let err = items.for_order(dropped.id).await.unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound { .. }));

    container
        .execute_sql(&format!("DELETE FROM products WHERE id = {kettle}"))
        .await?;
    let remaining = items.for_order(kept.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_id, None);
    assert_eq!(remaining[0].price_at_purchase, 2_500);
    Ok(())
}
