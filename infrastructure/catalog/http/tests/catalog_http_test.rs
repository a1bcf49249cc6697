use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use catalog_http::{CatalogServices, router};
use redis_connection::Memory;
use serde_json::{Value, json};
use sql_connection::{SqlConnect, build_pool};
use tower::ServiceExt;

// Nothing listens on port 1; requests that reach the store fail with a pool
// error, everything rejected earlier never notices.
fn app() -> anyhow::Result<Router> {
    let pool = build_pool("postgresql://nobody@127.0.0.1:1/none", Some(1))?;
    let services =
        CatalogServices::new(SqlConnect::new(pool), Arc::new(Memory::default()));
    Ok(router(services))
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
async fn negative_category_number_is_rejected() -> anyhow::Result<()> {
    let (status, body) = send(
        Method::POST,
        "/categories/add",
        json!({ "name": "Kitchen", "num_category": -1 }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn blank_brand_name_is_rejected() -> anyhow::Result<()> {
    let (status, body) =
        send(Method::POST, "/brands/add", json!({ "name": "  " })).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn child_category_requires_a_parent_id() -> anyhow::Result<()> {
    let (status, _) = send(
        Method::POST,
        "/categories/child/add",
        json!({ "name": "Pans" }),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn unreachable_database_is_an_internal_error() -> anyhow::Result<()> {
    let (status, body) = send(Method::GET, "/brands", json!({})).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    Ok(())
}
