//! HTTP handlers for the Segmenter REST API.
//!
//! This module organizes handlers by domain:
//! - `health`: Health check endpoints
//! - `products`: Catalog listing and lookup
//! - `ingest`: WooCommerce ingestion
//! - `segments`: Segment rule evaluation

pub mod health;
pub mod ingest;
pub mod products;
pub mod segments;

pub use health::health_check;
pub use ingest::ingest_products;
pub use products::{get_product, list_products};
pub use segments::evaluate_segment;
