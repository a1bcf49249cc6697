use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use order_http::{OrderServices, router};
use serde_json::{Value, json};
use sql_connection::{SqlConnect, build_pool};
use tower::ServiceExt;

// Nothing listens on port 1; requests that reach the store fail with a pool
// error, everything rejected earlier never notices.
fn app() -> anyhow::Result<Router> {
    let pool = build_pool("postgresql://nobody@127.0.0.1:1/none", Some(1))?;
    Ok(router(OrderServices::new(SqlConnect::new(pool))))
}

async fn send(
    method: Method, uri: &str, body: Value,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;

    let response = app()?.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Ok((status, json))
}

#[tokio::test]
async fn unknown_status_lists_the_accepted_values() -> anyhow::Result<()> {
    let (status, body) = send(
        Method::PATCH,
        "/orders/1/status",
        json!({ "status": "lost" }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_STATUS");
    let message = body["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("processing"), "{message}");
    Ok(())
}

#[tokio::test]
async fn unknown_payment_status_is_rejected() -> anyhow::Result<()> {
    let (status, body) = send(
        Method::PATCH,
        "/orders/1/payment",
        json!({ "payment_status": "maybe" }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_STATUS");
    Ok(())
}

#[tokio::test]
async fn order_with_negative_total_is_rejected() -> anyhow::Result<()> {
    let (status, body) = send(
        Method::POST,
        "/orders/add",
        json!({
            "name": "Rauf",
            "surname": "Aliyev",
            "phone_number": "+994501234567",
            "total_price": -10
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn valid_requests_reach_the_store() -> anyhow::Result<()> {
    let (status, _) = send(
        Method::PATCH,
        "/orders/1/status",
        json!({ "status": "shipped" }),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(Method::GET, "/order_items/3", json!({})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
