//! WooCommerce ingestion handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::types::{ErrorResponse, IngestResponse};
use crate::AppState;
use segmenter_core::CatalogStore;

/// Replace the catalog with the products of the configured WooCommerce store.
#[utoipa::path(
    post,
    path = "/api/products/ingest",
    tag = "products",
    responses(
        (status = 200, description = "Catalog replaced", body = IngestResponse),
        (status = 500, description = "Ingestion failed", body = ErrorResponse),
        (status = 503, description = "WooCommerce is not configured", body = ErrorResponse)
    )
)]
pub async fn ingest_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let Some(client) = &state.woocommerce else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "WooCommerce ingestion is not configured. Set woocommerce.base_url, \
                 woocommerce.consumer_key and woocommerce.consumer_secret",
            )),
        )
            .into_response();
    };

    tracing::info!(store = client.base_url(), "Starting product ingestion");

    let report = match client.fetch_all().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Product ingestion failed");
            return ingest_failed(e);
        }
    };

    let count = match state.catalog.replace_all(report.products) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, "Product ingestion failed");
            return ingest_failed(e);
        }
    };

    if let Some(path) = state.snapshot_path.clone() {
        let persist_state = Arc::clone(&state);
        let result =
            tokio::task::spawn_blocking(move || persist_state.catalog.save_snapshot(&path)).await;
        match result {
            Ok(Ok(())) => tracing::debug!("Catalog snapshot written"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to write catalog snapshot"),
            Err(e) => tracing::warn!(error = %e, "Snapshot task panicked"),
        }
    }

    tracing::info!(
        products = count,
        pages = report.pages,
        skipped = report.skipped,
        "Product ingestion finished"
    );

    Json(IngestResponse {
        success: true,
        message: format!("Successfully ingested {count} products"),
        count,
        pages: report.pages,
        skipped: report.skipped,
    })
    .into_response()
}

fn ingest_failed(error: impl ToString) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details(
            "Failed to ingest products",
            error,
        )),
    )
        .into_response()
}
