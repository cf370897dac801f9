//! Health check handler.

use axum::{response::IntoResponse, Json};

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Object)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "segmenter",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
