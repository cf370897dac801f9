//! Coercion of raw rule values into typed values.

use super::{CoercedValue, CompileError};
use crate::registry::{FieldKind, FieldSpec};

/// Location of the line being compiled, used to build errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineContext<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Coerces `raw` into a value matching the kind of `spec`.
pub(crate) fn coerce(
    spec: &'static FieldSpec,
    raw: &str,
    ctx: LineContext<'_>,
) -> Result<CoercedValue, CompileError> {
    match spec.kind {
        FieldKind::Numeric => {
            let cleaned = strip_loose_quotes(raw).trim();
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(CoercedValue::Number)
                .ok_or_else(|| CompileError::InvalidNumber {
                    line: ctx.number,
                    text: ctx.text.to_string(),
                    field: spec.name,
                    value: raw.to_string(),
                })
        }
        FieldKind::Boolean => {
            let cleaned = strip_loose_quotes(raw).trim();
            if cleaned.eq_ignore_ascii_case("true") {
                Ok(CoercedValue::Bool(true))
            } else if cleaned.eq_ignore_ascii_case("false") {
                Ok(CoercedValue::Bool(false))
            } else {
                Err(CompileError::InvalidBoolean {
                    line: ctx.number,
                    text: ctx.text.to_string(),
                    field: spec.name,
                    value: raw.to_string(),
                })
            }
        }
        FieldKind::Text | FieldKind::TextSet => {
            Ok(CoercedValue::String(strip_matching_quotes(raw).to_string()))
        }
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Strips at most one quote character from each end, independently.
pub(crate) fn strip_loose_quotes(value: &str) -> &str {
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}

/// Strips one layer of quotes only when both ends carry the same quote.
pub(crate) fn strip_matching_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && is_quote(first) => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
