#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]
#![allow(clippy::needless_for_each)]
//! Segmenter Server - REST API library for product segment evaluation.
//!
//! This module provides the HTTP handlers, types and WooCommerce client for
//! the Segmenter REST API.
//!
//! ## OpenAPI Documentation
//!
//! The API is documented using OpenAPI 3.0. Access the interactive documentation at:
//! - Swagger UI: `GET /swagger-ui`
//! - OpenAPI JSON: `GET /api-docs/openapi.json`

mod handlers;
pub mod ingest;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use segmenter_core::InMemoryCatalog;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::OpenApi;

// Re-export types for external use
pub use ingest::{IngestError, IngestReport, WooCommerceClient};
pub use types::*;

// Re-export handlers for routing
pub use handlers::{evaluate_segment, get_product, health_check, ingest_products, list_products};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

/// Segmenter API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Segmenter API",
        version = "0.3.0",
        description = "Product segment evaluation for WooCommerce catalogs. \
            Segments are written as line-oriented rules (`price > 1000`) and \
            evaluated against the ingested catalog.",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Catalog products and ingestion"),
        (name = "segments", description = "Segment rule evaluation")
    ),
    paths(
        handlers::health::health_check,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::ingest::ingest_products,
        handlers::segments::evaluate_segment
    ),
    components(
        schemas(
            ProductListResponse,
            ProductResponse,
            IngestResponse,
            EvaluateSegmentRequest,
            EvaluateSegmentResponse,
            SegmentErrorResponse,
            ErrorResponse
        )
    )
)]
pub struct ApiDoc;

// ============================================================================
// Application State
// ============================================================================

/// Application state shared across handlers.
pub struct AppState {
    /// The product catalog.
    pub catalog: InMemoryCatalog,
    /// WooCommerce client, `None` when ingestion is not configured.
    pub woocommerce: Option<WooCommerceClient>,
    /// Where the catalog is written after each ingestion.
    pub snapshot_path: Option<PathBuf>,
}

impl AppState {
    /// Creates state around `catalog` with ingestion disabled.
    #[must_use]
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self {
            catalog,
            woocommerce: None,
            snapshot_path: None,
        }
    }
}

/// Builds the API router (without Swagger UI or middleware layers).
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products))
        .route("/api/products/ingest", post(ingest_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/segments/evaluate", post(evaluate_segment))
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================
