//! Boolean rule trees over numeric feature columns.
//!
//! A [`Rule`] is either a threshold [`Predicate`] on one column or an
//! [`Operator`] node combining an ordered list of possibly negated children.
//! Child order is whatever the producer stored and is never rearranged.

pub mod columns;
pub mod eval;

use crate::error::{Result, RulefmtError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use columns::ColumnNames;

/// Maximum operator nesting. Trees deeper than this are malformed, which
/// keeps the recursive walks within a bounded stack.
pub const MAX_DEPTH: usize = 256;

/// How the truth values of a node's children combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
    /// At least one child true.
    AtLeast1,
    /// At most one child true.
    AtMost1,
    /// Exactly one child true.
    Choose1,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::And,
        Operator::Or,
        Operator::AtLeast1,
        Operator::AtMost1,
        Operator::Choose1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::AtLeast1 => "AtLeast1",
            Operator::AtMost1 => "AtMost1",
            Operator::Choose1 => "Choose1",
        }
    }

    /// Combine child truth values.
    pub fn combine<I: IntoIterator<Item = bool>>(&self, values: I) -> bool {
        let mut values = values.into_iter();
        match self {
            Operator::And => values.all(|v| v),
            Operator::Or | Operator::AtLeast1 => values.any(|v| v),
            Operator::AtMost1 => values.filter(|v| *v).nth(1).is_none(),
            Operator::Choose1 => values.filter(|v| *v).take(2).count() == 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Invalid operator: {}", s))
    }
}

/// Threshold condition on a single column, referenced by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `name<threshold`
    LessThan { column: usize, threshold: f64 },
    /// `low<=name<high`
    Between { column: usize, low: f64, high: f64 },
    /// `name>=threshold`
    GreaterEqual { column: usize, threshold: f64 },
}

impl Predicate {
    pub fn column(&self) -> usize {
        match self {
            Predicate::LessThan { column, .. }
            | Predicate::Between { column, .. }
            | Predicate::GreaterEqual { column, .. } => *column,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Predicate::LessThan { threshold, .. } | Predicate::GreaterEqual { threshold, .. } => {
                if threshold.is_nan() {
                    return Err(RulefmtError::MalformedRule(format!(
                        "NaN threshold on column {}",
                        self.column()
                    )));
                }
            }
            Predicate::Between { column, low, high } => {
                if low.is_nan() || high.is_nan() {
                    return Err(RulefmtError::MalformedRule(format!(
                        "NaN bound on column {}",
                        column
                    )));
                }
                if low >= high {
                    return Err(RulefmtError::MalformedRule(format!(
                        "Empty range {}..{} on column {}",
                        low, high, column
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A child slot of an operator node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    #[serde(default)]
    pub negated: bool,
    pub rule: Rule,
}

impl Child {
    pub fn new(rule: Rule) -> Self {
        Self { negated: false, rule }
    }

    pub fn negated(rule: Rule) -> Self {
        Self { negated: true, rule }
    }
}

impl From<Rule> for Child {
    fn from(rule: Rule) -> Self {
        Child::new(rule)
    }
}

impl From<Predicate> for Child {
    fn from(predicate: Predicate) -> Self {
        Child::new(Rule::Leaf(predicate))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    Leaf(Predicate),
    Node {
        operator: Operator,
        children: Vec<Child>,
    },
}

impl Rule {
    pub fn less_than(column: usize, threshold: f64) -> Self {
        Rule::Leaf(Predicate::LessThan { column, threshold })
    }

    pub fn between(column: usize, low: f64, high: f64) -> Self {
        Rule::Leaf(Predicate::Between { column, low, high })
    }

    pub fn greater_equal(column: usize, threshold: f64) -> Self {
        Rule::Leaf(Predicate::GreaterEqual { column, threshold })
    }

    pub fn node<I, C>(operator: Operator, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Rule::Node {
            operator,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Rule::Leaf(_))
    }

    /// Check the structural invariants of the whole tree, including the
    /// [`MAX_DEPTH`] nesting limit. Formatting validates first; `depth`,
    /// `leaf_count` and the other walks assume a tree within the limit.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(0)
    }

    fn validate_at(&self, level: usize) -> Result<()> {
        match self {
            Rule::Leaf(predicate) => predicate.validate(),
            Rule::Node { operator, children } => {
                if level >= MAX_DEPTH {
                    return Err(RulefmtError::MalformedRule(format!(
                        "Nesting deeper than {} levels",
                        MAX_DEPTH
                    )));
                }
                if children.is_empty() {
                    return Err(RulefmtError::MalformedRule(format!(
                        "{} node has no children",
                        operator
                    )));
                }
                children
                    .iter()
                    .try_for_each(|child| child.rule.validate_at(level + 1))
            }
        }
    }

    /// Validate and additionally check every column resolves in `columns`.
    pub fn validate_columns(&self, columns: &ColumnNames) -> Result<()> {
        self.validate()?;
        match self.columns().last() {
            Some(&max) => columns.name(max).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Leaf depth is 0.
    pub fn depth(&self) -> usize {
        match self {
            Rule::Leaf(_) => 0,
            Rule::Node { children, .. } => {
                1 + children.iter().map(|c| c.rule.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Rule::Leaf(_) => 1,
            Rule::Node { children, .. } => children.iter().map(|c| c.rule.leaf_count()).sum(),
        }
    }

    pub fn negation_count(&self) -> usize {
        match self {
            Rule::Leaf(_) => 0,
            Rule::Node { children, .. } => children
                .iter()
                .map(|c| usize::from(c.negated) + c.rule.negation_count())
                .sum(),
        }
    }

    /// Sorted, deduplicated column indices referenced by the leaves.
    pub fn columns(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out.sort_unstable();
        out.dedup();
        out
    }

    fn collect_columns(&self, out: &mut Vec<usize>) {
        match self {
            Rule::Leaf(predicate) => out.push(predicate.column()),
            Rule::Node { children, .. } => {
                for child in children {
                    child.rule.collect_columns(out);
                }
            }
        }
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Rule::Leaf(predicate)
    }
}

/// Renders with default column names `x<i>`; invalid trees render as the
/// validation error.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Err(e) = self.validate() {
            return write!(f, "<{}>", e);
        }
        let width = self.columns().last().map_or(0, |max| max + 1);
        match crate::text::format(self, &ColumnNames::indexed(width)) {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rule {
        Rule::node(
            Operator::AtLeast1,
            [
                Child::negated(Rule::less_than(3, 7.0)),
                Child::new(Rule::node(
                    Operator::Choose1,
                    [
                        Child::new(Rule::less_than(2, 16.0)),
                        Child::negated(Rule::less_than(0, 12.0)),
                    ],
                )),
                Child::new(Rule::greater_equal(2, 1.5)),
            ],
        )
    }

    #[test]
    fn test_operator_from_str() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
        assert!("and".parse::<Operator>().is_err());
        assert!("Not".parse::<Operator>().is_err());
    }

    #[test]
    fn test_combine_cardinality() {
        let cases: [(&[bool], [bool; 5]); 4] = [
            // And, Or, AtLeast1, AtMost1, Choose1
            (&[false, false], [false, false, false, true, false]),
            (&[true, false], [false, true, true, true, true]),
            (&[true, true], [true, true, true, false, false]),
            (&[true, true, true], [true, true, true, false, false]),
        ];
        for (values, expected) in cases {
            for (op, want) in Operator::ALL.iter().zip(expected) {
                assert_eq!(op.combine(values.iter().copied()), want, "{} {:?}", op, values);
            }
        }
    }

    #[test]
    fn test_validate_rejects_empty_node() {
        let rule = Rule::node(
            Operator::And,
            [Child::new(Rule::node(Operator::Or, Vec::<Child>::new()))],
        );
        let err = rule.validate().unwrap_err();
        assert!(err.is_malformed_rule());
        assert!(err.to_string().contains("Or node has no children"));
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        assert!(Rule::less_than(0, f64::NAN).validate().is_err());
        assert!(Rule::between(0, 2.0, 2.0).validate().is_err());
        assert!(Rule::between(0, 3.0, 2.0).validate().is_err());
        assert!(Rule::between(0, f64::NEG_INFINITY, 2.0).validate().is_ok());
    }

    fn nested(levels: usize) -> Rule {
        let mut rule = Rule::less_than(0, 1.0);
        for _ in 0..levels {
            rule = Rule::node(Operator::And, [rule]);
        }
        rule
    }

    #[test]
    fn test_validate_enforces_depth_limit() {
        assert!(nested(MAX_DEPTH).validate().is_ok());

        let err = nested(MAX_DEPTH + 1).validate().unwrap_err();
        assert!(err.is_malformed_rule());
        assert!(err.to_string().contains("Nesting deeper"));
        assert!(crate::text::format(&nested(MAX_DEPTH + 1), &ColumnNames::indexed(1)).is_err());
    }

    #[test]
    fn test_validate_columns() {
        let rule = sample();
        assert!(rule.validate_columns(&ColumnNames::indexed(4)).is_ok());
        let err = rule.validate_columns(&ColumnNames::indexed(3)).unwrap_err();
        assert!(matches!(err, RulefmtError::ColumnOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_stats() {
        let rule = sample();
        assert_eq!(rule.depth(), 2);
        assert_eq!(rule.leaf_count(), 4);
        assert_eq!(rule.negation_count(), 2);
        assert_eq!(rule.columns(), vec![0, 2, 3]);
        assert_eq!(Rule::less_than(0, 1.0).depth(), 0);
    }

    #[test]
    fn test_display_uses_indexed_names() {
        let rule = Rule::node(
            Operator::And,
            [Child::negated(Rule::less_than(0, 12.0)), Child::new(Rule::less_than(2, 16.0))],
        );
        assert_eq!(rule.to_string(), "And(~[x0<12.0], [x2<16.0])");
    }

    #[test]
    fn test_json_shape() {
        let rule = Rule::node(Operator::Or, [Child::negated(Rule::greater_equal(1, 0.5))]);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(
            json,
            r#"{"Node":{"operator":"Or","children":[{"negated":true,"rule":{"Leaf":{"GreaterEqual":{"column":1,"threshold":0.5}}}}]}}"#
        );
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
