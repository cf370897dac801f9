//! Segment rule compiler.
//!
//! Turns line-oriented rule text into a validated [`RuleSet`] and then into a
//! storage-agnostic [`Predicate`]. Compilation is pure: no I/O, no shared
//! mutable state, safe to call from any number of threads.
//!
//! # Example
//!
//! ```
//! use segmenter_core::rules::compile;
//!
//! let predicate = compile("price > 1000\nstock_status = instock\non_sale = true")?;
//! assert_eq!(predicate.len(), 3);
//! # Ok::<(), segmenter_core::rules::CompileError>(())
//! ```
//!
//! Each line is `field operator value` with operators `=`, `!=`, `>`, `<`,
//! `>=` and `<=`. Values may be wrapped in matching single or double quotes.

mod ast;
mod coercion;
mod error;
mod parser;

pub use ast::{CoercedValue, Operator, Rule, RuleSet};
pub use error::CompileError;

use coercion::{coerce, LineContext};
use parser::{parse_line, significant_lines};

use crate::predicate::Predicate;
use crate::registry;

/// Example rule text shown alongside compilation errors.
pub const EXAMPLE_RULES: &str = "price > 1000\nstock_status = instock\non_sale = true";

/// Compiles rule text into a predicate.
///
/// Blank input compiles to a predicate that matches every record.
///
/// # Errors
///
/// Returns the [`CompileError`] of the first offending line; no partial
/// predicate is ever produced.
pub fn compile(text: &str) -> Result<Predicate, CompileError> {
    let rules = parse_rules(text)?;
    let rule_count = rules.len();
    let predicate = rules.into_predicate();

    tracing::debug!(
        rules = rule_count,
        fields = predicate.len(),
        "Compiled segment rules"
    );

    Ok(predicate)
}

/// Parses and validates rule text into a typed rule set.
///
/// # Errors
///
/// Returns the [`CompileError`] of the first offending line.
pub fn parse_rules(text: &str) -> Result<RuleSet, CompileError> {
    significant_lines(text)
        .map(|(number, line)| compile_line(LineContext { number, text: line }))
        .collect::<Result<Vec<_>, _>>()
        .map(RuleSet::new)
}

fn compile_line(ctx: LineContext<'_>) -> Result<Rule, CompileError> {
    let raw = parse_line(ctx.text).ok_or_else(|| CompileError::MalformedRule {
        line: ctx.number,
        text: ctx.text.to_string(),
    })?;

    let spec = registry::lookup(raw.field).map_err(|e| CompileError::UnknownField {
        line: ctx.number,
        text: ctx.text.to_string(),
        field: e.name,
        valid_fields: registry::field_names(),
    })?;

    if !spec.kind.allows(raw.operator) {
        return Err(CompileError::IllegalOperator {
            line: ctx.number,
            text: ctx.text.to_string(),
            field: spec.name,
            kind: spec.kind,
            operator: raw.operator,
            allowed: spec.kind.legal_operators().to_vec(),
        });
    }

    let value = coerce(spec, raw.value, ctx)?;

    // Operator and value were both checked against the field kind above.
    Ok(Rule {
        field: spec,
        operator: raw.operator,
        value,
    })
}

#[cfg(test)]
mod parser_tests;

#[cfg(test)]
mod compile_tests;
