pub mod config;
pub mod error;
pub mod rule;
pub mod text;
pub mod util;

pub use config::Config;
pub use error::{Result, RulefmtError};
pub use rule::{Child, ColumnNames, Operator, Predicate, Rule, MAX_DEPTH};
pub use text::{format, format_with, parse, FormatOptions, RuleFormatter, RuleParser};
