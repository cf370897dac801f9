//! Tests for the rule line parser

use super::parser::*;
use super::Operator;

// ========== Line splitting ==========

#[test]
fn test_significant_lines_skip_blanks_and_trim() {
    let lines: Vec<_> = significant_lines("  price > 1  \n\n\t\non_sale = true\r\n").collect();
    assert_eq!(lines, vec![(1, "price > 1"), (4, "on_sale = true")]);
}

#[test]
fn test_significant_lines_empty_input() {
    assert_eq!(significant_lines("").count(), 0);
    assert_eq!(significant_lines(" \n \r\n\t").count(), 0);
}

// ========== Grammar ==========

#[test]
fn test_parse_simple_rule() {
    let raw = parse_line("price > 1000").unwrap();
    assert_eq!(raw.field, "price");
    assert_eq!(raw.operator, Operator::Gt);
    assert_eq!(raw.value, "1000");
}

#[test]
fn test_parse_without_whitespace() {
    let raw = parse_line("price>=1000").unwrap();
    assert_eq!(raw.field, "price");
    assert_eq!(raw.operator, Operator::Ge);
    assert_eq!(raw.value, "1000");
}

#[test]
fn test_parse_all_operators() {
    let cases = [
        ("a = 1", Operator::Eq),
        ("a != 1", Operator::Ne),
        ("a > 1", Operator::Gt),
        ("a < 1", Operator::Lt),
        ("a >= 1", Operator::Ge),
        ("a <= 1", Operator::Le),
    ];
    for (line, expected) in cases {
        let raw = parse_line(line).unwrap();
        assert_eq!(raw.operator, expected, "line: {line}");
        assert_eq!(raw.value, "1", "line: {line}");
    }
}

#[test]
fn test_two_char_operators_are_not_split() {
    let raw = parse_line("price<=5").unwrap();
    assert_eq!(raw.operator, Operator::Le);
    assert_eq!(raw.value, "5");

    let raw = parse_line("price >= 5").unwrap();
    assert_eq!(raw.operator, Operator::Ge);
    assert_eq!(raw.value, "5");
}

#[test]
fn test_value_keeps_inner_whitespace_and_quotes() {
    let raw = parse_line("title = \"Galaxy  S24 Ultra\"").unwrap();
    assert_eq!(raw.value, "\"Galaxy  S24 Ultra\"");
}

#[test]
fn test_value_may_contain_operator_characters_after_first() {
    let raw = parse_line("title = a=b<c").unwrap();
    assert_eq!(raw.operator, Operator::Eq);
    assert_eq!(raw.value, "a=b<c");
}

#[test]
fn test_ident_allows_digits_and_underscore() {
    let raw = parse_line("stock_quantity2 < 3").unwrap();
    assert_eq!(raw.field, "stock_quantity2");
}

#[test]
fn test_malformed_lines() {
    for line in [
        "price",
        "price >",
        "price >> 5",
        "price =< 5",
        "price == 5",
        "price =! 5",
        "price ! 5",
        "> 5",
        "stock-status = instock",
        "price <> 5",
    ] {
        assert!(parse_line(line).is_none(), "expected malformed: {line}");
    }
}
