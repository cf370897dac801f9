//! Predicate matching against catalog records.

use std::cmp::Ordering;

use super::{Constraint, Predicate};
use crate::catalog::{FieldValue, Product};
use crate::rules::CoercedValue;

impl Predicate {
    /// Returns `true` if `product` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.iter().all(|(field, constraints)| {
            let actual = product.value_of(field);
            constraints.iter().all(|c| c.matches(actual))
        })
    }
}

impl Constraint {
    /// Evaluates the constraint against one field value.
    ///
    /// A null value satisfies only the negated constraints.
    #[must_use]
    pub fn matches(&self, actual: FieldValue<'_>) -> bool {
        match self {
            Self::Equals(expected) => values_equal(actual, expected),
            Self::NotEquals(expected) => !values_equal(actual, expected),
            Self::GreaterThan(expected) => {
                compare_values(actual, expected) == Some(Ordering::Greater)
            }
            Self::LessThan(expected) => compare_values(actual, expected) == Some(Ordering::Less),
            Self::AtLeast(expected) => {
                compare_values(actual, expected).is_some_and(Ordering::is_ge)
            }
            Self::AtMost(expected) => compare_values(actual, expected).is_some_and(Ordering::is_le),
            Self::Contains(member) => contains(actual, member),
            Self::NotContains(member) => !contains(actual, member),
        }
    }
}

/// Equality with document-store semantics: a set equals a value it contains.
fn values_equal(actual: FieldValue<'_>, expected: &CoercedValue) -> bool {
    match (actual, expected) {
        (FieldValue::Number(a), CoercedValue::Number(b)) => a == *b,
        (FieldValue::Bool(a), CoercedValue::Bool(b)) => a == *b,
        (FieldValue::Text(a), CoercedValue::String(b)) => a == b,
        (FieldValue::TextSet(members), CoercedValue::String(b)) => {
            members.iter().any(|m| m == b)
        }
        _ => false,
    }
}

/// Orders two values of the same kind; `None` when not comparable.
fn compare_values(actual: FieldValue<'_>, expected: &CoercedValue) -> Option<Ordering> {
    match (actual, expected) {
        (FieldValue::Number(a), CoercedValue::Number(b)) => a.partial_cmp(b),
        (FieldValue::Text(a), CoercedValue::String(b)) => Some(a.cmp(b.as_str())),
        (FieldValue::Bool(a), CoercedValue::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn contains(actual: FieldValue<'_>, member: &str) -> bool {
    match actual {
        FieldValue::TextSet(members) => members.iter().any(|m| m == member),
        FieldValue::Text(text) => text == member,
        _ => false,
    }
}
