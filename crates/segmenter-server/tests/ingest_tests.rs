//! Tests for WooCommerce ingestion against a mock store.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{body_json, create_ingest_app, post_json, send};
use segmenter_core::{CatalogStore, InMemoryCatalog, SortOrder};
use segmenter_server::{IngestError, WooCommerceClient};

fn woo_product(id: u64, status: &str, date_created: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "price": "149.90",
        "stock_status": status,
        "stock_quantity": null,
        "categories": [{"id": 9, "name": "Audio"}],
        "tags": [{"id": 1, "name": "featured"}],
        "on_sale": false,
        "date_created": date_created
    })
}

async fn mount_page(server: &MockServer, page: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", page))
        .and(query_param("consumer_key", "ck_test"))
        .and(query_param("consumer_secret", "cs_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> WooCommerceClient {
    WooCommerceClient::new(server.uri(), "ck_test", "cs_test").with_per_page(2)
}

#[tokio::test]
async fn test_fetch_all_pages_until_short_page() {
    // Arrange
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        json!([
            woo_product(1, "instock", "2024-01-01T00:00:00"),
            woo_product(2, "onbackorder", "2024-01-02T00:00:00")
        ]),
    )
    .await;
    mount_page(&server, "2", json!([woo_product(3, "outofstock", "2024-01-03T00:00:00")])).await;

    // Act
    let report = client(&server).fetch_all().await.expect("ingestion");

    // Assert
    assert_eq!(report.pages, 2);
    assert_eq!(report.skipped, 0);
    let ids: Vec<u64> = report.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(report.products[0].category, "Audio");
    assert_eq!(report.products[0].tags, vec!["featured"]);
    assert_eq!(report.products[0].stock_quantity, None);
}

#[tokio::test]
async fn test_short_page_ends_ingestion() {
    // Arrange
    let server = MockServer::start().await;
    mount_page(&server, "1", json!([woo_product(1, "instock", "2024-01-01T00:00:00")])).await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    // Act
    let report = client(&server).fetch_all().await.expect("ingestion");

    // Assert
    assert_eq!(report.pages, 1);
    assert_eq!(report.products.len(), 1);
}

#[tokio::test]
async fn test_store_ignoring_page_hits_page_cap() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            woo_product(1, "instock", "2024-01-01T00:00:00"),
            woo_product(2, "instock", "2024-01-02T00:00:00")
        ])))
        .expect(3)
        .mount(&server)
        .await;

    // Act
    let err = client(&server).with_max_pages(3).fetch_all().await.unwrap_err();

    // Assert
    assert!(matches!(err, IngestError::PageLimit { limit: 3 }));
}

#[tokio::test]
async fn test_fetch_page_sends_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).fetch_page(1).await.expect("page");
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_unmappable_records_are_skipped() {
    // Arrange
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        json!([
            woo_product(1, "instock", "2024-01-01T00:00:00"),
            woo_product(2, "discontinued", "2024-01-02T00:00:00"),
            woo_product(3, "instock", "")
        ]),
    )
    .await;
    mount_page(&server, "2", json!([])).await;

    // Act
    let report = client(&server).fetch_all().await.expect("ingestion");

    // Assert
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.skipped, 2);
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid consumer key"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_all().await.unwrap_err();
    match err {
        IngestError::Status { status, page, body } => {
            assert_eq!(status, 401);
            assert_eq!(page, 1);
            assert!(body.contains("invalid consumer key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_array_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "oops"})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_all().await.unwrap_err();
    assert!(matches!(err, IngestError::UnexpectedBody { page: 1 }));
}

// ============================================================================
// Endpoint
// ============================================================================

#[tokio::test]
async fn test_ingest_endpoint_replaces_catalog() {
    // Arrange
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        json!([
            woo_product(10, "instock", "2024-05-01T00:00:00"),
            woo_product(11, "instock", "2024-06-01T00:00:00")
        ]),
    )
    .await;
    mount_page(&server, "2", json!([])).await;
    let (app, state) = create_ingest_app(client(&server));

    // Act
    let response = send(app, post_json("/api/products/ingest", &json!({}))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    assert_eq!(json["message"], "Successfully ingested 2 products");

    let ids: Vec<u64> = state.catalog.all(SortOrder::default()).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![11, 10]);
}

#[tokio::test]
async fn test_ingest_endpoint_writes_snapshot() {
    // Arrange
    let server = MockServer::start().await;
    mount_page(&server, "1", json!([woo_product(5, "instock", "2024-05-01T00:00:00")])).await;
    mount_page(&server, "2", json!([])).await;

    let dir = TempDir::new().expect("temp dir");
    let snapshot = dir.path().join("products.json");
    let (app, _) = {
        let mut state = segmenter_server::AppState::new(InMemoryCatalog::new());
        state.woocommerce = Some(client(&server));
        state.snapshot_path = Some(snapshot.clone());
        let state = std::sync::Arc::new(state);
        (segmenter_server::api_router(std::sync::Arc::clone(&state)), state)
    };

    // Act
    let response = send(app, post_json("/api/products/ingest", &json!({}))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let reloaded = InMemoryCatalog::from_snapshot(&snapshot).expect("snapshot");
    assert_eq!(reloaded.len(), 1);
}

#[tokio::test]
async fn test_ingest_endpoint_failure_returns_500() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (app, state) = create_ingest_app(client(&server));

    // Act
    let response = send(app, post_json("/api/products/ingest", &json!({}))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to ingest products");
    assert!(json["details"].as_str().unwrap().contains("503"));
    assert!(state.catalog.is_empty());
}
