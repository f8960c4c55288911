use crate::error::{Result, RulefmtError};
use crate::rule::{ColumnNames, Predicate, Rule};
use crate::util::format::{format_threshold, round_threshold, DEFAULT_PRECISION, MAX_PRECISION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places thresholds are rounded to.
    pub precision: u32,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FormatOptions {
    /// Fails when `precision` exceeds [`MAX_PRECISION`].
    pub fn with_precision(precision: u32) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(RulefmtError::Config(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, precision
            )));
        }
        Ok(Self { precision })
    }
}

/// Renders rule trees in canonical text form.
pub struct RuleFormatter<'a> {
    columns: &'a ColumnNames,
    options: FormatOptions,
}

impl<'a> RuleFormatter<'a> {
    pub fn new(columns: &'a ColumnNames) -> Self {
        Self::with_options(columns, FormatOptions::default())
    }

    pub fn with_options(columns: &'a ColumnNames, options: FormatOptions) -> Self {
        Self { columns, options }
    }

    /// Format the whole tree. The tree is validated first so that either a
    /// complete string or an error is produced.
    pub fn format(&self, rule: &Rule) -> Result<String> {
        rule.validate_columns(self.columns)?;

        let mut out = String::new();
        self.write_rule(rule, &mut out)?;
        Ok(out)
    }

    fn write_rule(&self, rule: &Rule, out: &mut String) -> Result<()> {
        match rule {
            Rule::Leaf(predicate) => self.write_predicate(predicate, out),
            Rule::Node { operator, children } => {
                out.push_str(operator.as_str());
                out.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if child.negated {
                        out.push('~');
                    }
                    self.write_rule(&child.rule, out)?;
                }
                out.push(')');
                Ok(())
            }
        }
    }

    fn write_predicate(&self, predicate: &Predicate, out: &mut String) -> Result<()> {
        let name = self.columns.name(predicate.column())?;
        let precision = self.options.precision;

        let text = match *predicate {
            Predicate::LessThan { threshold, .. } => {
                format!("[{}<{}]", name, format_threshold(threshold, precision))
            }
            Predicate::Between { column, low, high } => {
                // Rounding can collapse a narrow range into an empty one.
                if round_threshold(low, precision) >= round_threshold(high, precision) {
                    return Err(RulefmtError::MalformedRule(format!(
                        "Range {}..{} on column {} is empty at precision {}",
                        low, high, column, precision
                    )));
                }
                format!(
                    "[{}<={}<{}]",
                    format_threshold(low, precision),
                    name,
                    format_threshold(high, precision)
                )
            }
            Predicate::GreaterEqual { threshold, .. } => {
                format!("[{}>={}]", name, format_threshold(threshold, precision))
            }
        };
        out.push_str(&text);
        Ok(())
    }
}
