//! Storage-agnostic segment predicates.
//!
//! A [`Predicate`] maps each constrained field to the constraints a matching
//! record must satisfy. Every constraint of every field must hold; a predicate
//! without constraints matches every record.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use segmenter_core::predicate::{Constraint, Predicate};
//! use segmenter_core::registry::Field;
//!
//! let mut predicate = Predicate::new();
//! predicate.push(Field::Price, Constraint::GreaterThan(1000.0.into()));
//! predicate.push(Field::Tags, Constraint::Contains("featured".into()));
//!
//! let segment: Vec<_> = products.iter().filter(|p| predicate.matches(p)).collect();
//! ```

mod conversion;
mod document;
mod matching;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::registry::Field;
use crate::rules::CoercedValue;

/// A single requirement on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Constraint {
    /// field == value
    Equals(CoercedValue),
    /// field != value
    NotEquals(CoercedValue),
    /// field > value
    GreaterThan(CoercedValue),
    /// field < value
    LessThan(CoercedValue),
    /// field >= value
    AtLeast(CoercedValue),
    /// field <= value
    AtMost(CoercedValue),
    /// Set field has a member equal to the value.
    Contains(String),
    /// Set field has no member equal to the value.
    NotContains(String),
}

/// Per-field conjunction of constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    constraints: IndexMap<Field, Vec<Constraint>>,
}

impl Predicate {
    /// Creates a predicate that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a constraint on `field`, keeping earlier ones.
    pub fn push(&mut self, field: Field, constraint: Constraint) {
        self.constraints.entry(field).or_default().push(constraint);
    }

    /// Number of constrained fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if nothing is constrained (the "no filter" case).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Total number of constraints across all fields.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.values().map(Vec::len).sum()
    }

    /// Constraints on `field`, empty if the field is unconstrained.
    #[must_use]
    pub fn constraints_for(&self, field: Field) -> &[Constraint] {
        self.constraints.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Iterates constrained fields in the order they were first constrained.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[Constraint])> {
        self.constraints
            .iter()
            .map(|(field, constraints)| (*field, constraints.as_slice()))
    }
}
