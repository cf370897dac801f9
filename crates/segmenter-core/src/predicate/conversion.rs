//! Conversion from compiled rules to predicate constraints.

use super::{Constraint, Predicate};
use crate::registry::FieldKind;
use crate::rules::{CoercedValue, Operator, Rule, RuleSet};

impl From<Rule> for Constraint {
    fn from(rule: Rule) -> Self {
        let Rule {
            field,
            operator,
            value,
        } = rule;

        // Rule::new admits only `=` and `!=` with a string member on text sets.
        match (field.kind, operator, value) {
            (FieldKind::TextSet, Operator::Eq, CoercedValue::String(member)) => {
                Self::Contains(member)
            }
            (FieldKind::TextSet, Operator::Ne, CoercedValue::String(member)) => {
                Self::NotContains(member)
            }
            (_, Operator::Eq, value) => Self::Equals(value),
            (_, Operator::Ne, value) => Self::NotEquals(value),
            (_, Operator::Gt, value) => Self::GreaterThan(value),
            (_, Operator::Lt, value) => Self::LessThan(value),
            (_, Operator::Ge, value) => Self::AtLeast(value),
            (_, Operator::Le, value) => Self::AtMost(value),
        }
    }
}

impl Extend<Rule> for Predicate {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, rules: I) {
        for rule in rules {
            let field = rule.field.field;
            self.push(field, Constraint::from(rule));
        }
    }
}

impl FromIterator<Rule> for Predicate {
    fn from_iter<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let mut predicate = Self::new();
        predicate.extend(rules);
        predicate
    }
}

impl From<RuleSet> for Predicate {
    fn from(rules: RuleSet) -> Self {
        rules.into_iter().collect()
    }
}
