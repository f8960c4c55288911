use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulefmtError {
    #[error("Malformed rule: {0}")]
    MalformedRule(String),

    #[error("Malformed rule: column index {index} out of range for {len} columns")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RulefmtError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        RulefmtError::Parse {
            offset,
            message: message.into(),
        }
    }

    /// True for errors raised by structurally invalid trees, including
    /// column references the mapping cannot resolve.
    pub fn is_malformed_rule(&self) -> bool {
        matches!(
            self,
            RulefmtError::MalformedRule(_) | RulefmtError::ColumnOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RulefmtError>;
