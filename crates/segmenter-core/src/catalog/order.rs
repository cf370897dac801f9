//! Result ordering for catalog queries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{FieldValue, Product};
use crate::error::{Error, Result};
use crate::registry::{self, Field, FieldKind};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

/// Ordering applied to query results.
///
/// Defaults to `created_at` descending (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Field to sort by.
    pub field: Field,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: Field::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortOrder {
    /// Creates an ordering on a scalar field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortableField`] for set-valued fields.
    pub fn new(field: Field, direction: SortDirection) -> Result<Self> {
        if field.kind() == FieldKind::TextSet {
            return Err(Error::UnsortableField(field.name().to_string()));
        }
        Ok(Self { field, direction })
    }

    /// Creates an ordering from a rule-text field name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortableField`] for unknown or set-valued fields.
    pub fn by_name(name: &str, direction: SortDirection) -> Result<Self> {
        let spec = registry::lookup(name).map_err(|e| Error::UnsortableField(e.name))?;
        Self::new(spec.field, direction)
    }

    /// Compares two products under this ordering.
    ///
    /// Null values sort before every other value in ascending order.
    #[must_use]
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = compare_field_values(a.value_of(self.field), b.value_of(self.field));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_field_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(&y),
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Less,
        (_, FieldValue::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
