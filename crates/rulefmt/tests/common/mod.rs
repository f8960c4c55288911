#![allow(dead_code)]

use proptest::prelude::*;
use rulefmt_lib::{Child, ColumnNames, Operator, Predicate, Rule};

pub const NAMES: [&str; 5] = ["a", "b", "c", "d", "petal width"];

pub fn columns() -> ColumnNames {
    ColumnNames::new(NAMES).unwrap()
}

pub fn leaf_lt(column: usize, threshold: f64) -> Child {
    Child::new(Rule::less_than(column, threshold))
}

pub fn not_lt(column: usize, threshold: f64) -> Child {
    Child::negated(Rule::less_than(column, threshold))
}

/// Thresholds already on the 4-decimal grid, so text round-trips exactly.
pub fn arb_threshold() -> impl Strategy<Value = f64> {
    (-2_000_000i64..2_000_000).prop_map(|k| k as f64 / 10_000.0)
}

pub fn arb_predicate() -> impl Strategy<Value = Predicate> {
    let column = 0..NAMES.len();
    prop_oneof![
        (column.clone(), arb_threshold())
            .prop_map(|(column, threshold)| Predicate::LessThan { column, threshold }),
        (column.clone(), arb_threshold())
            .prop_map(|(column, threshold)| Predicate::GreaterEqual { column, threshold }),
        (column, -2_000_000i64..2_000_000, 1i64..100_000).prop_map(|(column, low, width)| {
            Predicate::Between {
                column,
                low: low as f64 / 10_000.0,
                high: (low + width) as f64 / 10_000.0,
            }
        }),
    ]
}

pub fn arb_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

pub fn arb_rule() -> impl Strategy<Value = Rule> {
    let leaf = arb_predicate().prop_map(Rule::Leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            arb_operator(),
            prop::collection::vec((any::<bool>(), inner), 1..4),
        )
            .prop_map(|(operator, children)| Rule::Node {
                operator,
                children: children
                    .into_iter()
                    .map(|(negated, rule)| Child { negated, rule })
                    .collect(),
            })
    })
}
