//! Common test utilities for segmenter-server integration tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use segmenter_core::{InMemoryCatalog, Product, StockStatus};
use segmenter_server::{api_router, AppState, WooCommerceClient};

/// Builds a product with the fields most tests vary.
pub fn product(id: u64, title: &str, price: f64, created_at: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        stock_status: StockStatus::InStock,
        stock_quantity: Some(5),
        category: "Smartphones".to_string(),
        tags: Vec::new(),
        on_sale: false,
        created_at: created_at.to_string(),
    }
}

/// A small catalog with one product per interesting combination.
pub fn sample_products() -> Vec<Product> {
    let mut flagship = product(1, "Flagship Phone", 1299.0, "2024-03-01T10:00:00");
    flagship.on_sale = true;
    flagship.tags = vec!["featured".to_string()];

    let mut older = product(2, "Last Year Phone", 1099.0, "2023-09-15T10:00:00");
    older.on_sale = true;

    let mut budget = product(3, "Budget Phone", 199.0, "2024-01-20T10:00:00");
    budget.stock_quantity = None;

    let mut sold_out = product(4, "Premium Tablet", 1499.0, "2024-02-10T10:00:00");
    sold_out.stock_status = StockStatus::OutOfStock;
    sold_out.on_sale = true;
    sold_out.category = "Tablets".to_string();

    vec![flagship, older, budget, sold_out]
}

/// Helper to create test app with all routes over the sample catalog.
pub fn create_test_app() -> Router {
    let catalog = InMemoryCatalog::with_products(sample_products()).expect("unique ids");
    api_router(Arc::new(AppState::new(catalog)))
}

/// Helper to create test app with ingestion pointed at `client`.
pub fn create_ingest_app(client: WooCommerceClient) -> (Router, Arc<AppState>) {
    let mut state = AppState::new(InMemoryCatalog::new());
    state.woocommerce = Some(client);
    let state = Arc::new(state);
    (api_router(Arc::clone(&state)), state)
}

/// Sends a request and returns the response.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("Request failed")
}

/// Builds a JSON POST request.
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Builds a GET request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}
