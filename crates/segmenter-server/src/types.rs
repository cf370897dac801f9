//! Request/Response types for the Segmenter REST API.
//!
//! This module contains all the data transfer objects used by the API handlers.

use segmenter_core::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Product Types
// ============================================================================

/// List of catalog products.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    /// Always `true`.
    pub success: bool,
    /// Number of products returned.
    pub count: usize,
    /// Products, newest first.
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<Product>,
}

/// A single catalog product.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Always `true`.
    pub success: bool,
    /// The product.
    #[schema(value_type = Object)]
    pub product: Product,
}

/// Result of a WooCommerce ingestion.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable summary.
    #[schema(example = "Successfully ingested 250 products")]
    pub message: String,
    /// Number of products now in the catalog.
    pub count: usize,
    /// Number of WooCommerce pages fetched.
    pub pages: u32,
    /// Records skipped because they could not be mapped.
    pub skipped: usize,
}

// ============================================================================
// Segment Types
// ============================================================================

/// Request to evaluate segment rules against the catalog.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EvaluateSegmentRequest {
    /// Rule text, one `field operator value` comparison per line.
    #[serde(default)]
    #[schema(value_type = String, example = "price > 1000\nstock_status = instock\non_sale = true")]
    pub rules: serde_json::Value,
    /// Field to order results by. Defaults to `created_at`.
    #[serde(default)]
    #[schema(example = "price")]
    pub order_by: Option<String>,
    /// Sort newest/largest first. Defaults to `true`.
    #[serde(default)]
    pub descending: Option<bool>,
}

/// Products matching a segment.
#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluateSegmentResponse {
    /// Always `true`.
    pub success: bool,
    /// The evaluated rule text, trimmed.
    pub rules: String,
    /// Document-store rendering of the compiled predicate.
    #[schema(value_type = Object)]
    pub query: serde_json::Value,
    /// Number of matching products.
    pub count: usize,
    /// Matching products in the requested order.
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<Product>,
}

/// Error returned when segment rules cannot be evaluated.
#[derive(Debug, Serialize, ToSchema)]
pub struct SegmentErrorResponse {
    /// Error summary.
    pub error: String,
    /// Full error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Error code (e.g. `SEG-102`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "SEG-102")]
    pub code: Option<String>,
    /// 1-based line of the offending rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Example of valid rule text.
    pub example: String,
}

// ============================================================================
// Common Types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Underlying cause, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates an error response without details.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Creates an error response with details.
    pub fn with_details(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}
