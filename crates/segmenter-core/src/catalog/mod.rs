//! Product catalog: records, WooCommerce mapping and in-memory storage.

mod order;
mod product;
mod store;
mod woocommerce;

pub use order::{SortDirection, SortOrder};
pub use product::{FieldValue, Product, StockStatus};
pub use store::{CatalogStore, InMemoryCatalog};
pub use woocommerce::{WooProduct, WooTerm};
