//! Tests for rule compilation

use super::*;
use crate::predicate::Constraint;
use crate::registry::{Field, FieldKind};

// ========== Empty input ==========

#[test]
fn test_empty_input_compiles_to_match_all() {
    for text in ["", "   ", "\n\n", " \r\n\t \n"] {
        let predicate = compile(text).unwrap();
        assert!(predicate.is_empty(), "input {text:?} should match everything");
    }
}

// ========== Scenarios ==========

#[test]
fn test_compile_multi_line_segment() {
    let predicate = compile("price > 1000\nstock_status = instock\non_sale = true").unwrap();

    assert_eq!(predicate.len(), 3);
    assert_eq!(
        predicate.constraints_for(Field::Price),
        &[Constraint::GreaterThan(CoercedValue::Number(1000.0))]
    );
    assert_eq!(
        predicate.constraints_for(Field::StockStatus),
        &[Constraint::Equals(CoercedValue::String("instock".into()))]
    );
    assert_eq!(
        predicate.constraints_for(Field::OnSale),
        &[Constraint::Equals(CoercedValue::Bool(true))]
    );
}

#[test]
fn test_compile_tags_membership() {
    let predicate = compile("tags = featured").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::Tags),
        &[Constraint::Contains("featured".into())]
    );
}

#[test]
fn test_compile_tags_negated_membership() {
    let predicate = compile("tags != 'clearance'").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::Tags),
        &[Constraint::NotContains("clearance".into())]
    );
}

#[test]
fn test_multiple_rules_on_same_field_conjoin() {
    let predicate = compile("price >= 100\nprice <= 500").unwrap();
    assert_eq!(predicate.len(), 1);
    assert_eq!(
        predicate.constraints_for(Field::Price),
        &[
            Constraint::AtLeast(CoercedValue::Number(100.0)),
            Constraint::AtMost(CoercedValue::Number(500.0)),
        ]
    );
}

#[test]
fn test_parse_rules_keeps_typed_rules() {
    let rules = parse_rules("\nstock_quantity < 5\ncategory != Phones\n").unwrap();
    assert_eq!(rules.len(), 2);

    let first = rules.iter().next().unwrap();
    assert_eq!(first.field().name, "stock_quantity");
    assert_eq!(first.field().kind, FieldKind::Numeric);
    assert_eq!(first.operator(), Operator::Lt);
    assert_eq!(first.value(), &CoercedValue::Number(5.0));
}

// ========== Coercion ==========

#[test]
fn test_numeric_forms_coerce_to_same_value() {
    assert_eq!(compile("price = 42").unwrap(), compile("price = 42.0").unwrap());
    assert_eq!(compile("price = 42").unwrap(), compile("price = \"42\"").unwrap());
    assert_eq!(compile("price = 42").unwrap(), compile("price = '42'").unwrap());
}

#[test]
fn test_quoted_and_unquoted_text_are_identical() {
    let plain = compile("category = Smartphones").unwrap();
    assert_eq!(plain, compile("category = \"Smartphones\"").unwrap());
    assert_eq!(plain, compile("category = 'Smartphones'").unwrap());
}

#[test]
fn test_text_mismatched_quotes_are_kept() {
    let predicate = compile("title = \"Phone'").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::Title),
        &[Constraint::Equals(CoercedValue::String("\"Phone'".into()))]
    );
}

#[test]
fn test_text_strips_only_one_quote_layer() {
    let predicate = compile("title = \"'quoted'\"").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::Title),
        &[Constraint::Equals(CoercedValue::String("'quoted'".into()))]
    );
}

#[test]
fn test_boolean_is_case_insensitive() {
    let predicate = compile("on_sale = FALSE").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::OnSale),
        &[Constraint::Equals(CoercedValue::Bool(false))]
    );
    assert!(compile("on_sale != 'True'").is_ok());
}

#[test]
fn test_created_at_compares_as_text() {
    let predicate = compile("created_at = 2024-01-01T00:00:00").unwrap();
    assert_eq!(
        predicate.constraints_for(Field::CreatedAt),
        &[Constraint::Equals(CoercedValue::String(
            "2024-01-01T00:00:00".into()
        ))]
    );
}

// ========== Errors ==========

#[test]
fn test_unknown_field_lists_valid_fields() {
    let err = compile("foo = 1").unwrap_err();
    match &err {
        CompileError::UnknownField {
            field,
            valid_fields,
            line,
            ..
        } => {
            assert_eq!(field, "foo");
            assert_eq!(*line, 1);
            assert_eq!(
                valid_fields,
                &vec![
                    "id",
                    "title",
                    "price",
                    "stock_status",
                    "stock_quantity",
                    "category",
                    "tags",
                    "on_sale",
                    "created_at"
                ]
            );
        }
        other => panic!("expected UnknownField, got {other:?}"),
    }
    assert_eq!(err.code(), "SEG-102");
    assert!(err.to_string().contains("created_at"));
}

#[test]
fn test_ordering_operator_on_text_is_illegal() {
    let err = compile("category > 5").unwrap_err();
    assert_eq!(err.kind(), "IllegalOperator");
    match err {
        CompileError::IllegalOperator {
            field,
            operator,
            allowed,
            kind,
            ..
        } => {
            assert_eq!(field, "category");
            assert_eq!(operator, Operator::Gt);
            assert_eq!(kind, FieldKind::Text);
            assert_eq!(allowed, vec![Operator::Eq, Operator::Ne]);
        }
        other => panic!("expected IllegalOperator, got {other:?}"),
    }
}

#[test]
fn test_ordering_operator_on_boolean_and_tags_is_illegal() {
    assert_eq!(compile("on_sale >= true").unwrap_err().code(), "SEG-103");
    assert_eq!(compile("tags < a").unwrap_err().code(), "SEG-103");
    assert_eq!(compile("created_at > 2024").unwrap_err().code(), "SEG-103");
}

#[test]
fn test_invalid_boolean() {
    let err = compile("on_sale = maybe").unwrap_err();
    assert!(matches!(
        &err,
        CompileError::InvalidBoolean { field: "on_sale", value, .. } if value == "maybe"
    ));
    assert!(err.to_string().contains("Use true or false"));
}

#[test]
fn test_invalid_number() {
    for text in ["price > cheap", "price > 1,000", "price > NaN", "price < inf", "id = ''"] {
        let err = compile(text).unwrap_err();
        assert_eq!(err.kind(), "InvalidNumber", "input: {text}");
    }
}

#[test]
fn test_malformed_rule_references_exact_line() {
    let err = compile("price >> 5").unwrap_err();
    assert_eq!(
        err,
        CompileError::MalformedRule {
            line: 1,
            text: "price >> 5".into()
        }
    );
    assert!(err.to_string().contains("\"price >> 5\""));
}

#[test]
fn test_first_failing_line_wins() {
    let err = compile("price > 1\n\n  on_sale = maybe  \nfoo = 1").unwrap_err();
    assert_eq!(err.line(), 3);
    assert_eq!(err.text(), "on_sale = maybe");
    assert_eq!(err.kind(), "InvalidBoolean");
}

#[test]
fn test_leading_blank_lines_are_counted() {
    let err = compile("\n\nprice > 10\nfoo = 1").unwrap_err();
    assert_eq!(err.line(), 4);
    assert_eq!(err.code(), "SEG-102");
}

#[test]
fn test_field_error_takes_precedence_over_value_error() {
    let err = compile("colour > not-a-number").unwrap_err();
    assert_eq!(err.kind(), "UnknownField");
}

// ========== Property-based tests ==========

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn operator_strategy() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::Eq),
            Just(Operator::Ne),
            Just(Operator::Gt),
            Just(Operator::Lt),
            Just(Operator::Ge),
            Just(Operator::Le),
        ]
    }

    fn padding() -> impl Strategy<Value = String> {
        "[ \t]{0,3}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: surrounding whitespace never changes the compiled rule
        #[test]
        fn prop_whitespace_independent(
            op in operator_strategy(),
            value in -1.0e6f64..1.0e6,
            lead in padding(),
            mid1 in padding(),
            mid2 in padding(),
            trail in padding(),
        ) {
            let compact = format!("price{}{}", op.symbol(), value);
            let padded = format!("{lead}price{mid1}{}{mid2}{value}{trail}", op.symbol());

            prop_assert_eq!(compile(&compact).unwrap(), compile(&padded).unwrap());
        }

        /// Property: the parsed operator is exactly the written one
        #[test]
        fn prop_operator_round_trips(op in operator_strategy(), value in 0u32..10_000) {
            let rules = parse_rules(&format!("stock_quantity {} {value}", op.symbol())).unwrap();
            let rule = rules.iter().next().unwrap();
            prop_assert_eq!(rule.operator(), op);
            prop_assert_eq!(rule.value().clone(), CoercedValue::Number(f64::from(value)));
        }

        /// Property: unquoted text values survive compilation verbatim
        #[test]
        fn prop_text_value_verbatim(value in "[A-Za-z0-9][A-Za-z0-9 _.-]{0,20}[A-Za-z0-9]") {
            let predicate = compile(&format!("category = {value}")).unwrap();
            prop_assert_eq!(
                predicate.constraints_for(Field::Category),
                &[Constraint::Equals(CoercedValue::String(value.clone()))]
            );
        }

        /// Property: a failing line anywhere fails the whole compilation
        #[test]
        fn prop_no_partial_predicate(good_lines in 0usize..5, bad_at in 0usize..5) {
            let mut lines = vec!["price > 1"; good_lines];
            let bad_at = bad_at.min(lines.len());
            lines.insert(bad_at, "price >> 1");

            let err = compile(&lines.join("\n")).unwrap_err();
            prop_assert_eq!(err.line(), bad_at + 1);
        }
    }
}
