//! In-memory catalog store.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::Path;

use super::{Product, SortOrder};
use crate::error::{Error, Result};
use crate::predicate::Predicate;

/// Storage for catalog products that can evaluate predicates.
pub trait CatalogStore: Send + Sync {
    /// Replaces the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProduct`] if two products share an ID; the
    /// catalog is left unchanged.
    fn replace_all(&self, products: Vec<Product>) -> Result<usize>;

    /// Adds products to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProduct`] if an ID is already present; no
    /// product is added.
    fn insert_many(&self, products: Vec<Product>) -> Result<usize>;

    /// Returns the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] when no product has that ID.
    fn get(&self, id: u64) -> Result<Product>;

    /// Number of products.
    fn len(&self) -> usize;

    /// Returns `true` if the catalog holds no product.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the products matching `predicate`, sorted by `order`.
    fn evaluate(&self, predicate: &Predicate, order: SortOrder) -> Vec<Product>;

    /// Returns every product, sorted by `order`.
    fn all(&self, order: SortOrder) -> Vec<Product> {
        self.evaluate(&Predicate::new(), order)
    }
}

/// Catalog held in memory behind a reader-writer lock.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `products`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProduct`] if two products share an ID.
    pub fn with_products(products: Vec<Product>) -> Result<Self> {
        ensure_unique_ids(&products, &HashSet::new())?;
        Ok(Self {
            products: RwLock::new(products),
        })
    }

    /// Loads a catalog from a JSON file holding an array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a product array,
    /// or contains duplicate IDs.
    pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let products: Vec<Product> = serde_json::from_slice(&bytes)?;
        tracing::info!(
            path = %path.as_ref().display(),
            products = products.len(),
            "Loaded catalog snapshot"
        );
        Self::with_products(products)
    }

    /// Writes the catalog to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_vec_pretty(&*self.products.read())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn ensure_unique_ids(products: &[Product], existing: &HashSet<u64>) -> Result<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if existing.contains(&product.id) || !seen.insert(product.id) {
            return Err(Error::DuplicateProduct(product.id));
        }
    }
    Ok(())
}

impl CatalogStore for InMemoryCatalog {
    fn replace_all(&self, products: Vec<Product>) -> Result<usize> {
        ensure_unique_ids(&products, &HashSet::new())?;
        let count = products.len();
        *self.products.write() = products;
        tracing::debug!(products = count, "Replaced catalog contents");
        Ok(count)
    }

    fn insert_many(&self, products: Vec<Product>) -> Result<usize> {
        let mut guard = self.products.write();
        let existing: HashSet<u64> = guard.iter().map(|p| p.id).collect();
        ensure_unique_ids(&products, &existing)?;
        let count = products.len();
        guard.extend(products);
        Ok(count)
    }

    fn get(&self, id: u64) -> Result<Product> {
        self.products
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(Error::ProductNotFound(id))
    }

    fn len(&self) -> usize {
        self.products.read().len()
    }

    fn evaluate(&self, predicate: &Predicate, order: SortOrder) -> Vec<Product> {
        let mut matched: Vec<Product> = self
            .products
            .read()
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| order.compare(a, b));

        tracing::debug!(
            constraints = predicate.constraint_count(),
            matched = matched.len(),
            "Evaluated segment predicate"
        );
        matched
    }
}
