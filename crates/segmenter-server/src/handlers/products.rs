//! Catalog product handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::types::{ErrorResponse, ProductListResponse, ProductResponse};
use crate::AppState;
use segmenter_core::{CatalogStore, Error, SortOrder};

/// List all products, newest first.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "All catalog products", body = ProductListResponse)
    )
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let products = state.catalog.all(SortOrder::default());
    Json(ProductListResponse {
        success: true,
        count: products.len(),
        products,
    })
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.catalog.get(id) {
        Ok(product) => Json(ProductResponse {
            success: true,
            product,
        })
        .into_response(),
        Err(e @ Error::ProductNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_details("Product not found", e)),
        )
            .into_response(),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ErrorResponse::with_details("Failed to fetch product", e)),
            )
                .into_response()
        }
    }
}
