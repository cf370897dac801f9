//! Document-store rendering of a predicate.
//!
//! The rendering mirrors the query a document database would receive and is
//! returned to API callers so they can see how their rules were understood.

use serde_json::{json, Map, Value};

use super::{Constraint, Predicate};

impl Constraint {
    /// Query operator key (e.g. `$gt`).
    #[must_use]
    pub const fn query_operator(&self) -> &'static str {
        match self {
            Self::Equals(_) => "$eq",
            Self::NotEquals(_) => "$ne",
            Self::GreaterThan(_) => "$gt",
            Self::LessThan(_) => "$lt",
            Self::AtLeast(_) => "$gte",
            Self::AtMost(_) => "$lte",
            Self::Contains(_) => "$in",
            Self::NotContains(_) => "$nin",
        }
    }

    fn query_operand(&self) -> Value {
        match self {
            Self::Equals(v)
            | Self::NotEquals(v)
            | Self::GreaterThan(v)
            | Self::LessThan(v)
            | Self::AtLeast(v)
            | Self::AtMost(v) => Value::from(v.clone()),
            Self::Contains(member) | Self::NotContains(member) => json!([member]),
        }
    }
}

impl Predicate {
    /// Renders the predicate as a document-store query.
    ///
    /// Constraints on one field merge into one operator object, e.g.
    /// `{"price": {"$gte": 10, "$lte": 20}}`. When a field repeats an operator
    /// (`price > 1` and `price > 5`) the keys would collide, so the whole
    /// document is rendered as `{"$and": [...]}` with one clause per
    /// constraint instead. An empty predicate renders as `{}`.
    #[must_use]
    pub fn to_query_document(&self) -> Value {
        if self.has_repeated_operator() {
            let clauses: Vec<Value> = self
                .iter()
                .flat_map(|(field, constraints)| {
                    constraints.iter().map(move |c| {
                        let mut operator = Map::new();
                        operator.insert(c.query_operator().to_string(), c.query_operand());
                        let mut clause = Map::new();
                        clause.insert(field.name().to_string(), Value::Object(operator));
                        Value::Object(clause)
                    })
                })
                .collect();
            return json!({ "$and": Value::Array(clauses) });
        }

        let mut document = Map::new();
        for (field, constraints) in self.iter() {
            let operators: Map<String, Value> = constraints
                .iter()
                .map(|c| (c.query_operator().to_string(), c.query_operand()))
                .collect();
            document.insert(field.name().to_string(), Value::Object(operators));
        }
        Value::Object(document)
    }

    fn has_repeated_operator(&self) -> bool {
        self.iter().any(|(_, constraints)| {
            constraints.iter().enumerate().any(|(i, c)| {
                constraints[..i]
                    .iter()
                    .any(|earlier| earlier.query_operator() == c.query_operator())
            })
        })
    }
}
