//! Compilation errors for segment rules.

use thiserror::Error;

use super::Operator;
use crate::registry::FieldKind;

/// Error raised while compiling rule text.
///
/// Every variant carries the 1-based line number and the trimmed text of the
/// offending line so the message can be shown to the operator as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The line does not match `field operator value` (SEG-101).
    #[error("[SEG-101] Invalid rule format on line {line}: \"{text}\". Expected: field operator value")]
    MalformedRule {
        /// Line number.
        line: usize,
        /// Offending line.
        text: String,
    },

    /// The field is not in the registry (SEG-102).
    #[error("[SEG-102] Invalid field \"{field}\" on line {line}. Valid fields: {}", .valid_fields.join(", "))]
    UnknownField {
        /// Line number.
        line: usize,
        /// Offending line.
        text: String,
        /// The unknown field name.
        field: String,
        /// Every registered field name.
        valid_fields: Vec<&'static str>,
    },

    /// The operator cannot be used on the field's kind (SEG-103).
    #[error("[SEG-103] Operator \"{operator}\" is not allowed on {kind} field \"{field}\" (line {line}). Allowed operators: {}", join_operators(.allowed))]
    IllegalOperator {
        /// Line number.
        line: usize,
        /// Offending line.
        text: String,
        /// Field name.
        field: &'static str,
        /// Kind of the field.
        kind: FieldKind,
        /// The rejected operator.
        operator: Operator,
        /// Operators legal for the field's kind.
        allowed: Vec<Operator>,
    },

    /// The value is not a finite number (SEG-104).
    #[error("[SEG-104] Invalid numeric value for {field} on line {line}: {value}")]
    InvalidNumber {
        /// Line number.
        line: usize,
        /// Offending line.
        text: String,
        /// Field name.
        field: &'static str,
        /// Raw value as written.
        value: String,
    },

    /// The value is neither `true` nor `false` (SEG-105).
    #[error("[SEG-105] Invalid boolean value for {field} on line {line}: {value}. Use true or false")]
    InvalidBoolean {
        /// Line number.
        line: usize,
        /// Offending line.
        text: String,
        /// Field name.
        field: &'static str,
        /// Raw value as written.
        value: String,
    },
}

fn join_operators(operators: &[Operator]) -> String {
    operators
        .iter()
        .map(|op| op.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CompileError {
    /// Returns the error code (e.g., "SEG-101").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedRule { .. } => "SEG-101",
            Self::UnknownField { .. } => "SEG-102",
            Self::IllegalOperator { .. } => "SEG-103",
            Self::InvalidNumber { .. } => "SEG-104",
            Self::InvalidBoolean { .. } => "SEG-105",
        }
    }

    /// Returns the taxonomy name of the error (e.g., "MalformedRule").
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRule { .. } => "MalformedRule",
            Self::UnknownField { .. } => "UnknownField",
            Self::IllegalOperator { .. } => "IllegalOperator",
            Self::InvalidNumber { .. } => "InvalidNumber",
            Self::InvalidBoolean { .. } => "InvalidBoolean",
        }
    }

    /// Returns the 1-based number of the offending line.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedRule { line, .. }
            | Self::UnknownField { line, .. }
            | Self::IllegalOperator { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidBoolean { line, .. } => *line,
        }
    }

    /// Returns the trimmed text of the offending line.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::MalformedRule { text, .. }
            | Self::UnknownField { text, .. }
            | Self::IllegalOperator { text, .. }
            | Self::InvalidNumber { text, .. }
            | Self::InvalidBoolean { text, .. } => text,
        }
    }
}
