//! Segment evaluation handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::types::{EvaluateSegmentRequest, EvaluateSegmentResponse, SegmentErrorResponse};
use crate::AppState;
use segmenter_core::rules::EXAMPLE_RULES;
use segmenter_core::{compile, CatalogStore, Error, SortDirection, SortOrder};

/// Evaluate segment rules against the catalog.
///
/// Rules are compiled line by line; the first invalid line aborts the request
/// with its line number and error code.
#[utoipa::path(
    post,
    path = "/api/segments/evaluate",
    tag = "segments",
    request_body = EvaluateSegmentRequest,
    responses(
        (status = 200, description = "Matching products", body = EvaluateSegmentResponse),
        (status = 400, description = "Missing or invalid rules", body = SegmentErrorResponse)
    )
)]
pub async fn evaluate_segment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateSegmentRequest>,
) -> impl IntoResponse {
    // Compile the text as typed so reported lines match the editor.
    let rules = match req.rules.as_str() {
        Some(rules) if !rules.is_empty() => rules,
        _ => {
            return bad_request(SegmentErrorResponse {
                error: "Rules are required and must be a string".to_string(),
                details: None,
                code: None,
                line: None,
                example: EXAMPLE_RULES.to_string(),
            })
        }
    };

    let direction = if req.descending.unwrap_or(true) {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let order = match req.order_by.as_deref() {
        None => SortOrder {
            direction,
            ..SortOrder::default()
        },
        Some(field) => match SortOrder::by_name(field, direction) {
            Ok(order) => order,
            Err(e) => return rejected("Invalid sort order", &e),
        },
    };

    let predicate = match compile(rules) {
        Ok(predicate) => predicate,
        Err(e) => {
            tracing::debug!(code = e.code(), line = e.line(), "Rejected segment rules");
            return rejected("Failed to evaluate segment", &Error::from(e));
        }
    };

    let products = state.catalog.evaluate(&predicate, order);
    tracing::info!(
        constraints = predicate.constraint_count(),
        matched = products.len(),
        "Evaluated segment"
    );

    Json(EvaluateSegmentResponse {
        success: true,
        rules: rules.trim().to_string(),
        query: predicate.to_query_document(),
        count: products.len(),
        products,
    })
    .into_response()
}

fn bad_request(body: SegmentErrorResponse) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn rejected(summary: &str, error: &Error) -> axum::response::Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let line = match error {
        Error::Compile(e) => Some(e.line()),
        _ => None,
    };
    let body = SegmentErrorResponse {
        error: summary.to_string(),
        details: Some(error.to_string()),
        code: Some(error.code().to_string()),
        line,
        example: EXAMPLE_RULES.to_string(),
    };
    (status, Json(body)).into_response()
}
