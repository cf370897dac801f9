//! Typed rule values produced by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::predicate::Predicate;
use crate::registry::{FieldKind, FieldSpec};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than or equal (<=)
    Le,
}

impl Operator {
    /// Parses an operator symbol as written in rule text.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            _ => None,
        }
    }

    /// Symbol as written in rule text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    /// Returns `true` for `>`, `<`, `>=` and `<=`.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A rule value coerced to the kind of its field.
///
/// Text-set fields coerce to a single `String`: the member to test for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoercedValue {
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Text value or text-set member.
    String(String),
}

impl From<f64> for CoercedValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CoercedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for CoercedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CoercedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<CoercedValue> for serde_json::Value {
    fn from(value: CoercedValue) -> Self {
        match value {
            CoercedValue::Number(n) => Self::from(n),
            CoercedValue::Bool(b) => Self::Bool(b),
            CoercedValue::String(s) => Self::String(s),
        }
    }
}

/// One compiled line: a field, an operator and a coerced value.
///
/// A `Rule` always pairs its field with an operator legal for the field's
/// kind and a value whose tag matches that kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub(crate) field: &'static FieldSpec,
    pub(crate) operator: Operator,
    pub(crate) value: CoercedValue,
}

impl Rule {
    /// Builds a rule, or returns `None` if `operator` is not legal for the
    /// field's kind or `value` does not hold that kind.
    #[must_use]
    pub fn new(
        field: &'static FieldSpec,
        operator: Operator,
        value: CoercedValue,
    ) -> Option<Self> {
        let tag_matches = matches!(
            (field.kind, &value),
            (FieldKind::Numeric, CoercedValue::Number(_))
                | (FieldKind::Boolean, CoercedValue::Bool(_))
                | (FieldKind::Text | FieldKind::TextSet, CoercedValue::String(_))
        );
        (tag_matches && field.kind.allows(operator)).then_some(Self {
            field,
            operator,
            value,
        })
    }

    /// Registry entry of the referenced field.
    #[must_use]
    pub fn field(&self) -> &'static FieldSpec {
        self.field
    }

    /// Comparison operator.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Coerced value.
    #[must_use]
    pub fn value(&self) -> &CoercedValue {
        &self.value
    }
}

/// The conjunction of all rules parsed from one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from already-validated rules.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule was given; such a set matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Assembles the storage-agnostic predicate for this rule set.
    #[must_use]
    pub fn into_predicate(self) -> Predicate {
        Predicate::from(self)
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
