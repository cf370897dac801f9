//! # Segmenter Core
//!
//! Rule compiler and catalog evaluation for product segments.
//!
//! An operator describes a segment with a few lines of rule text, one
//! `field operator value` comparison per line. The compiler validates every
//! line against a static [field registry](registry), coerces each value to
//! the field's kind and assembles a storage-agnostic [`Predicate`]. The
//! predicate is then evaluated against catalog records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segmenter_core::{compile, CatalogStore, InMemoryCatalog, SortOrder};
//!
//! let catalog = InMemoryCatalog::from_snapshot("./products.json")?;
//!
//! let predicate = compile("price > 1000\nstock_status = instock\non_sale = true")?;
//!
//! // Newest first unless another order is requested
//! let segment = catalog.evaluate(&predicate, SortOrder::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::float_cmp)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod predicate;
pub mod registry;
pub mod rules;

pub use catalog::{
    CatalogStore, FieldValue, InMemoryCatalog, Product, SortDirection, SortOrder, StockStatus,
};
pub use config::{ConfigError, SegmenterConfig};
pub use error::{Error, Result};
pub use predicate::{Constraint, Predicate};
pub use registry::{Field, FieldKind, FieldSpec};
pub use rules::{compile, parse_rules, CoercedValue, CompileError, Operator, Rule, RuleSet};
