//! Evaluation of rule trees against rows of feature values.

use super::{Predicate, Rule, MAX_DEPTH};
use crate::error::{Result, RulefmtError};

impl Predicate {
    /// NaN satisfies no predicate.
    pub fn evaluate(&self, row: &[f64]) -> Result<bool> {
        let column = self.column();
        let x = *row.get(column).ok_or(RulefmtError::ColumnOutOfRange {
            index: column,
            len: row.len(),
        })?;

        Ok(match *self {
            Predicate::LessThan { threshold, .. } => x < threshold,
            Predicate::Between { low, high, .. } => low <= x && x < high,
            Predicate::GreaterEqual { threshold, .. } => x >= threshold,
        })
    }
}

impl Rule {
    /// Evaluate the rule on one row indexed by column.
    pub fn evaluate(&self, row: &[f64]) -> Result<bool> {
        self.evaluate_at(row, 0)
    }

    fn evaluate_at(&self, row: &[f64], level: usize) -> Result<bool> {
        match self {
            Rule::Leaf(predicate) => predicate.evaluate(row),
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
                let values = children
                    .iter()
                    .map(|child| Ok(child.rule.evaluate_at(row, level + 1)? != child.negated))
                    .collect::<Result<Vec<bool>>>()?;
                Ok(operator.combine(values))
            }
        }
    }

    /// Evaluate many rows, failing on the first error.
    pub fn evaluate_batch<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<bool>> {
        log::debug!("Evaluating rule over {} rows", rows.len());
        rows.iter().map(|row| self.evaluate(row.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Child, Operator};

    #[test]
    fn test_predicate_bounds() {
        let lt = Predicate::LessThan { column: 0, threshold: 1.0 };
        let ge = Predicate::GreaterEqual { column: 0, threshold: 1.0 };
        let between = Predicate::Between { column: 0, low: 1.0, high: 2.0 };

        assert!(lt.evaluate(&[0.5]).unwrap());
        assert!(!lt.evaluate(&[1.0]).unwrap());
        assert!(ge.evaluate(&[1.0]).unwrap());
        assert!(!ge.evaluate(&[0.999]).unwrap());
        assert!(between.evaluate(&[1.0]).unwrap());
        assert!(!between.evaluate(&[2.0]).unwrap());
    }

    #[test]
    fn test_nan_matches_nothing() {
        let lt = Predicate::LessThan { column: 0, threshold: 1.0 };
        let ge = Predicate::GreaterEqual { column: 0, threshold: 1.0 };
        assert!(!lt.evaluate(&[f64::NAN]).unwrap());
        assert!(!ge.evaluate(&[f64::NAN]).unwrap());
    }

    #[test]
    fn test_negation_flips_child() {
        let rule = Rule::node(Operator::And, [Child::negated(Rule::less_than(0, 12.0))]);
        assert!(rule.evaluate(&[13.0]).unwrap());
        assert!(!rule.evaluate(&[11.0]).unwrap());
    }

    #[test]
    fn test_short_row_is_error() {
        let rule = Rule::less_than(2, 1.0);
        let err = rule.evaluate(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, RulefmtError::ColumnOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_empty_node_is_error() {
        let rule = Rule::node(Operator::Choose1, Vec::<Child>::new());
        assert!(rule.evaluate(&[1.0]).unwrap_err().is_malformed_rule());
    }

    #[test]
    fn test_too_deep_is_error() {
        let mut rule = Rule::less_than(0, 1.0);
        for _ in 0..=MAX_DEPTH {
            rule = Rule::node(Operator::Or, [rule]);
        }
        assert!(rule.evaluate(&[0.0]).unwrap_err().is_malformed_rule());
    }

    #[test]
    fn test_batch() {
        let rule = Rule::node(
            Operator::Choose1,
            [Child::new(Rule::less_than(0, 5.0)), Child::new(Rule::greater_equal(1, 5.0))],
        );
        let rows = vec![vec![1.0, 1.0], vec![1.0, 9.0], vec![9.0, 9.0], vec![9.0, 1.0]];
        assert_eq!(rule.evaluate_batch(&rows).unwrap(), vec![true, false, true, false]);
    }
}
