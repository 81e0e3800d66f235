//! API integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sku_sync_server::{
    create_router,
    models::Product,
    repository::memory::MemoryCatalog,
    services::Services,
    AppConfig, AppState,
};

const UPDATE_URI: &str = "/wc/v3/products/update-by-sku";
const BASE_URL: &str = "http://localhost:8080";

async fn test_app() -> (Router, Arc<MemoryCatalog>) {
    let catalog = Arc::new(MemoryCatalog::new());
    catalog
        .insert_product(Product {
            id: 10,
            sku: "A1".into(),
            regular_price: Some("25.00".into()),
            ..Default::default()
        })
        .await;
    catalog
        .insert_product(Product {
            id: 11,
            sku: "B2".into(),
            ..Default::default()
        })
        .await;

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(catalog.clone())),
    };
    (create_router(state), catalog)
}

async fn send(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_with_memory_store() {
    let (app, _) = test_app().await;
    let request = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mixed_batch() {
    let (app, catalog) = test_app().await;
    let (status, body) = send(
        app,
        UPDATE_URI,
        json!([{"sku": "A1", "stock_quantity": 5}, {"sku": "ZZZ-missing"}]).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);
    assert_eq!(body["failed"], 1);
    assert_eq!(
        body["results"],
        json!([
            {"message": "product updated successfully", "id": 10, "sku": "A1"},
            {"sku": "ZZZ-missing", "error": "product not found"}
        ])
    );
    assert_eq!(catalog.product(10).await.unwrap().stock_quantity, Some(5));
}

#[tokio::test]
async fn test_empty_object_is_bad_request() {
    for payload in ["{}", "[]", "", "{not json"] {
        let (app, _) = test_app().await;
        let (status, body) = send(app, UPDATE_URI, payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert_eq!(
            body,
            json!({"error": "at least one object with sku and data to update is required"})
        );
    }
}

#[tokio::test]
async fn test_item_without_sku() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        app,
        UPDATE_URI,
        json!({"regular_price": "3.00", "featured": true}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["results"][0], json!({"sku": null, "error": "SKU not specified"}));
}

#[tokio::test]
async fn test_sku_from_query_string() {
    let (app, catalog) = test_app().await;
    let (status, body) = send(
        app,
        &format!("{}?sku=B2", UPDATE_URI),
        json!({"description": "from query"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["id"], 11);
    assert_eq!(catalog.product(11).await.unwrap().description, "from query");
}

#[tokio::test]
async fn test_query_sku_fills_lone_array_item() {
    let (app, _) = test_app().await;
    let (_, single) = send(
        app,
        &format!("{}?sku=B2", UPDATE_URI),
        json!({"featured": true}).to_string(),
    )
    .await;

    let (app, _) = test_app().await;
    let (_, lone) = send(
        app,
        &format!("{}?sku=B2", UPDATE_URI),
        json!([{"featured": true}]).to_string(),
    )
    .await;

    assert_eq!(single["results"][0], lone["results"][0]);
    assert_eq!(lone["results"][0]["id"], 11);
}

#[tokio::test]
async fn test_unreadable_fields_do_not_fail_items() {
    let (app, catalog) = test_app().await;
    let (status, body) = send(
        app,
        UPDATE_URI,
        json!([
            {"sku": "ZZZ-missing", "stock_quantity": "abc"},
            {"sku": "A1", "images": [1]}
        ])
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["results"],
        json!([
            {"sku": "ZZZ-missing", "error": "product not found"},
            {"message": "product updated successfully", "id": 10, "sku": "A1"}
        ])
    );
    assert!(catalog.product(10).await.unwrap().gallery.is_empty());
}

#[tokio::test]
async fn test_zero_sku_is_not_specified() {
    let (app, _) = test_app().await;
    let (_, body) = send(app, UPDATE_URI, json!([{"sku": "0"}, {"sku": 0}]).to_string()).await;

    assert_eq!(body["failed"], 2);
    assert_eq!(
        body["results"],
        json!([
            {"sku": null, "error": "SKU not specified"},
            {"sku": null, "error": "SKU not specified"}
        ])
    );
}

#[tokio::test]
async fn test_oversized_body_gets_json_error() {
    let mut config = AppConfig::default();
    config.server.body_limit_bytes = 16;
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(Arc::new(MemoryCatalog::new()))),
    };

    let (status, body) = send(
        create_router(state),
        UPDATE_URI,
        json!({"sku": "A1", "description": "well over sixteen bytes"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_bad_query_string_gets_json_error() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        app,
        &format!("{}?sku=A1&sku=B2", UPDATE_URI),
        json!({"featured": true}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_rename_collision() {
    let (app, catalog) = test_app().await;
    let (_, body) = send(
        app,
        UPDATE_URI,
        json!({"sku": "A1", "new_sku": "B2", "regular_price": "1.00"}).to_string(),
    )
    .await;

    assert_eq!(
        body["results"][0],
        json!({"sku": "A1", "error": "new SKU already exists on another product"})
    );
    assert_eq!(
        catalog.product(10).await.unwrap().regular_price.as_deref(),
        Some("25.00")
    );
}

#[tokio::test]
async fn test_on_sale_after_price_change() {
    let (app, catalog) = test_app().await;
    let (status, _) = send(
        app,
        UPDATE_URI,
        json!({"sku": "A1", "regular_price": "18.00", "on_sale": true}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let product = catalog.product(10).await.unwrap();
    assert_eq!(product.sale_price.as_deref(), Some("18.00"));
}

#[tokio::test]
async fn test_custom_namespace() {
    let catalog = Arc::new(MemoryCatalog::new());
    let mut config = AppConfig::default();
    config.api.namespace = "/api/catalog".to_string();
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(catalog)),
    };

    let (status, body) = send(
        create_router(state),
        "/api/catalog/update-by-sku",
        json!({"sku": "nope"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["error"], "product not found");
}

#[tokio::test]
#[ignore] // Run against a live server with: cargo test -- --ignored
async fn test_live_health_check() {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_live_update_unknown_sku() {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}{}", BASE_URL, UPDATE_URI))
        .json(&json!([{"sku": "ZZZ-missing-live-test"}]))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["failed"], 1);
    assert_eq!(body["results"][0]["error"], "product not found");
}
