pub mod format;
pub mod parser;

pub use format::{FormatOptions, RuleFormatter};
pub use parser::RuleParser;

use crate::error::Result;
use crate::rule::{ColumnNames, Rule};

/// Canonical text of `rule` with thresholds at the default precision.
pub fn format(rule: &Rule, columns: &ColumnNames) -> Result<String> {
    RuleFormatter::new(columns).format(rule)
}

pub fn format_with(rule: &Rule, columns: &ColumnNames, options: FormatOptions) -> Result<String> {
    RuleFormatter::with_options(columns, options).format(rule)
}

/// Parse canonical text back into a validated rule.
pub fn parse(text: &str, columns: &ColumnNames) -> Result<Rule> {
    RuleParser::new(text, columns).parse()
}
