//! Catalog product record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::registry::Field;

/// Stock state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Available.
    InStock,
    /// Sold out.
    OutOfStock,
    /// Orderable but not yet available.
    OnBackorder,
}

impl StockStatus {
    /// Wire name (`instock`, `outofstock`, `onbackorder`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instock" => Ok(Self::InStock),
            "outofstock" => Ok(Self::OutOfStock),
            "onbackorder" => Ok(Self::OnBackorder),
            other => Err(Error::InvalidRecord(format!(
                "stock_status '{other}' is not one of instock, outofstock, onbackorder"
            ))),
        }
    }
}

/// A product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: u64,
    /// Product title.
    pub title: String,
    /// Current price.
    #[serde(default)]
    pub price: f64,
    /// Stock state.
    pub stock_status: StockStatus,
    /// Units in stock, `None` when stock is not tracked.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Primary category name, empty when uncategorized.
    #[serde(default)]
    pub category: String,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the product is on sale.
    #[serde(default)]
    pub on_sale: bool,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// Borrowed view of one field of a product, typed by field kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Numeric field.
    Number(f64),
    /// Boolean field.
    Bool(bool),
    /// Text field.
    Text(&'a str),
    /// Text-set field.
    TextSet(&'a [String]),
    /// Nullable field without a value.
    Null,
}

impl Product {
    /// Returns the value of `field` for this product.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value_of(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Id => FieldValue::Number(self.id as f64),
            Field::Title => FieldValue::Text(&self.title),
            Field::Price => FieldValue::Number(self.price),
            Field::StockStatus => FieldValue::Text(self.stock_status.as_str()),
            Field::StockQuantity => self
                .stock_quantity
                .map_or(FieldValue::Null, |q| FieldValue::Number(q as f64)),
            Field::Category => FieldValue::Text(&self.category),
            Field::Tags => FieldValue::TextSet(&self.tags),
            Field::OnSale => FieldValue::Bool(self.on_sale),
            Field::CreatedAt => FieldValue::Text(&self.created_at),
        }
    }
}
