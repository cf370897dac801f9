//! Mapping from WooCommerce REST products to catalog records.
//!
//! Only the fields the catalog needs are read; everything else in the
//! WooCommerce payload is ignored.

use serde::Deserialize;
use serde_json::Value;

use super::{Product, StockStatus};
use crate::error::{Error, Result};

/// A category or tag reference in a WooCommerce product.
#[derive(Debug, Clone, Deserialize)]
pub struct WooTerm {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// The subset of a WooCommerce `/wp-json/wc/v3/products` entry used by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    /// Product ID.
    pub id: u64,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Price, usually a decimal string and empty when unset.
    #[serde(default)]
    pub price: Value,
    /// `instock`, `outofstock` or `onbackorder`.
    #[serde(default)]
    pub stock_status: String,
    /// Managed stock quantity.
    #[serde(default)]
    pub stock_quantity: Value,
    /// Categories, first one is the primary category.
    #[serde(default)]
    pub categories: Vec<WooTerm>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<WooTerm>,
    /// Sale flag.
    #[serde(default)]
    pub on_sale: bool,
    /// Creation timestamp.
    #[serde(default)]
    pub date_created: String,
}

impl TryFrom<WooProduct> for Product {
    type Error = Error;

    fn try_from(raw: WooProduct) -> Result<Self> {
        if raw.date_created.is_empty() {
            return Err(Error::InvalidRecord(format!(
                "product {} has no date_created",
                raw.id
            )));
        }

        Ok(Self {
            id: raw.id,
            title: raw.name,
            price: parse_price(&raw.price),
            stock_status: raw.stock_status.parse::<StockStatus>()?,
            stock_quantity: parse_quantity(&raw.stock_quantity),
            category: raw
                .categories
                .into_iter()
                .next()
                .map(|c| c.name)
                .unwrap_or_default(),
            tags: raw.tags.into_iter().map(|t| t.name).collect(),
            on_sale: raw.on_sale,
            created_at: raw.date_created,
        })
    }
}

impl Product {
    /// Converts one entry of a WooCommerce products response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when required fields are missing or
    /// the stock status is not a known value.
    pub fn from_woocommerce(raw: &Value) -> Result<Self> {
        let product = WooProduct::deserialize(raw)
            .map_err(|e| Error::InvalidRecord(format!("malformed WooCommerce product: {e}")))?;
        Self::try_from(product)
    }
}

/// Unparsable or empty prices become 0.
fn parse_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Absent, null, zero and unparsable quantities become `None`.
#[allow(clippy::cast_possible_truncation)]
fn parse_quantity(value: &Value) -> Option<i64> {
    let quantity = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (quantity != 0).then_some(quantity)
}
