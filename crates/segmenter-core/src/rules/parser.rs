//! Rule line parser implementation using pest.

use pest::Parser as PestParser;
use pest_derive::Parser;

use super::Operator;

#[derive(Parser)]
#[grammar = "rules/grammar.pest"]
pub(crate) struct RuleLineParser;

/// A syntactically valid line, before field validation and coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawRule<'a> {
    pub field: &'a str,
    pub operator: Operator,
    pub value: &'a str,
}

/// Splits rule text into `(line_number, trimmed_line)` pairs, skipping blank lines.
///
/// Line numbers are 1-based and count blank lines, so they match what the
/// operator sees in the editor.
pub(crate) fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parses one trimmed line into its field, operator and raw value.
///
/// Returns `None` if the line does not match the grammar.
pub(crate) fn parse_line(line: &str) -> Option<RawRule<'_>> {
    let rule_line = RuleLineParser::parse(Rule::rule_line, line).ok()?.next()?;

    let mut field = None;
    let mut operator = None;
    let mut value = None;

    for pair in rule_line.into_inner() {
        match pair.as_rule() {
            Rule::ident => field = Some(pair.as_str()),
            Rule::operator => operator = Operator::from_symbol(pair.as_str()),
            Rule::value => value = Some(pair.as_str().trim()),
            _ => {}
        }
    }

    Some(RawRule {
        field: field?,
        operator: operator?,
        value: value?,
    })
}
