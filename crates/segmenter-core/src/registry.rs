//! Field registry for segment rules.
//!
//! The registry is the single source of truth for which catalog fields may
//! appear in a rule, what kind of value each field holds, and which operators
//! are legal for that kind. It is a static table: fields are a closed enum, so
//! adding a field without classifying it fails to compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::rules::Operator;

/// The kind of value stored in a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Floating-point number.
    Numeric,
    /// `true` or `false`.
    Boolean,
    /// Free text, compared by equality.
    Text,
    /// A set of text members, compared by membership.
    TextSet,
}

const ALL_OPERATORS: [Operator; 6] = [
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Ge,
    Operator::Le,
];

const EQUALITY_OPERATORS: [Operator; 2] = [Operator::Eq, Operator::Ne];

impl FieldKind {
    /// Returns `true` if values of this kind are totally ordered.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Numeric)
    }

    /// Operators a rule may use on a field of this kind.
    #[must_use]
    pub fn legal_operators(self) -> &'static [Operator] {
        if self.is_ordered() {
            &ALL_OPERATORS
        } else {
            &EQUALITY_OPERATORS
        }
    }

    /// Returns `true` if `operator` may be applied to this kind.
    #[must_use]
    pub fn allows(self, operator: Operator) -> bool {
        !operator.is_ordering() || self.is_ordered()
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::TextSet => "text set",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog field that rules may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Product identifier.
    Id,
    /// Product title.
    Title,
    /// Current price.
    Price,
    /// `instock`, `outofstock` or `onbackorder`.
    StockStatus,
    /// Units in stock, absent when stock is not managed.
    StockQuantity,
    /// Primary category name.
    Category,
    /// Tag names.
    Tags,
    /// Whether the product is on sale.
    OnSale,
    /// ISO-8601 creation timestamp.
    CreatedAt,
}

/// Registry entry describing one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// The field this entry describes.
    pub field: Field,
    /// Name used in rule text.
    pub name: &'static str,
    /// Kind of value the field holds.
    pub kind: FieldKind,
    /// Whether a record may leave the field empty.
    pub nullable: bool,
}

impl FieldSpec {
    const fn new(field: Field, name: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            name,
            kind,
            nullable: false,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

// Indexed by `Field as usize`.
static FIELDS: [FieldSpec; 9] = [
    FieldSpec::new(Field::Id, "id", FieldKind::Numeric),
    FieldSpec::new(Field::Title, "title", FieldKind::Text),
    FieldSpec::new(Field::Price, "price", FieldKind::Numeric),
    FieldSpec::new(Field::StockStatus, "stock_status", FieldKind::Text),
    FieldSpec::new(Field::StockQuantity, "stock_quantity", FieldKind::Numeric).nullable(),
    FieldSpec::new(Field::Category, "category", FieldKind::Text),
    FieldSpec::new(Field::Tags, "tags", FieldKind::TextSet),
    FieldSpec::new(Field::OnSale, "on_sale", FieldKind::Boolean),
    FieldSpec::new(Field::CreatedAt, "created_at", FieldKind::Text),
];

impl Field {
    /// Every registered field, in registry order.
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::Title,
        Self::Price,
        Self::StockStatus,
        Self::StockQuantity,
        Self::Category,
        Self::Tags,
        Self::OnSale,
        Self::CreatedAt,
    ];

    /// Registry entry for this field.
    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    /// Name used in rule text.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Kind of value the field holds.
    #[must_use]
    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup of a name that is not in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field '{name}'. Valid fields: {}", field_names().join(", "))]
pub struct UnknownField {
    /// The name that was looked up.
    pub name: String,
}

/// Looks up a field by its rule-text name.
///
/// Names are case-sensitive.
///
/// # Errors
///
/// Returns [`UnknownField`] when `name` is not registered.
pub fn lookup(name: &str) -> Result<&'static FieldSpec, UnknownField> {
    FIELDS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| UnknownField {
            name: name.to_string(),
        })
}

/// Returns `true` only for ordered kinds.
#[must_use]
pub const fn is_ordered(kind: FieldKind) -> bool {
    kind.is_ordered()
}

/// Operators legal for `kind`, for diagnostics.
#[must_use]
pub fn legal_operators(kind: FieldKind) -> &'static [Operator] {
    kind.legal_operators()
}

/// Names of every registered field, in registry order.
#[must_use]
pub fn field_names() -> Vec<&'static str> {
    FIELDS.iter().map(|spec| spec.name).collect()
}

/// Every registry entry, in registry order.
#[must_use]
pub fn fields() -> &'static [FieldSpec] {
    &FIELDS
}
