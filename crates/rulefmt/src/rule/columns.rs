use crate::error::{Result, RulefmtError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Characters reserved by the text form; a column name containing one of
/// them could not be parsed back.
const RESERVED: &[char] = &['[', ']', '(', ')', ',', '~', '<', '>', '='];

/// Ordered mapping from column index to column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnNames {
    names: Vec<String>,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

impl ColumnNames {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut lookup = HashMap::with_capacity(names.len());

        for (index, name) in names.iter().enumerate() {
            validate_name(name)?;
            if lookup.insert(name.clone(), index).is_some() {
                return Err(RulefmtError::Config(format!("Duplicate column name '{}'", name)));
            }
        }

        Ok(Self { names, lookup })
    }

    /// Default names `x0 .. x{len-1}`.
    pub fn indexed(len: usize) -> Self {
        let names: Vec<String> = (0..len).map(|i| format!("x{}", i)).collect();
        let lookup = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, lookup }
    }

    pub fn name(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(RulefmtError::ColumnOutOfRange {
                index,
                len: self.names.len(),
            })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RulefmtError::Config("Column name cannot be empty".to_string()));
    }
    if name.trim() != name {
        return Err(RulefmtError::Config(format!(
            "Column name '{}' has leading or trailing whitespace",
            name
        )));
    }
    if let Some(c) = name.chars().find(|c| RESERVED.contains(c)) {
        return Err(RulefmtError::Config(format!(
            "Column name '{}' contains reserved character '{}'",
            name, c
        )));
    }
    Ok(())
}

impl TryFrom<Vec<String>> for ColumnNames {
    type Error = RulefmtError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        ColumnNames::new(names)
    }
}

impl From<ColumnNames> for Vec<String> {
    fn from(columns: ColumnNames) -> Self {
        columns.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let columns = ColumnNames::new(["a", "b", "c"]).unwrap();
        assert_eq!(columns.name(1).unwrap(), "b");
        assert_eq!(columns.index_of("c"), Some(2));
        assert_eq!(columns.index_of("d"), None);
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_out_of_range_is_malformed() {
        let columns = ColumnNames::new(["a"]).unwrap();
        let err = columns.name(3).unwrap_err();
        assert!(err.is_malformed_rule());
        assert!(matches!(err, RulefmtError::ColumnOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_rejects_reserved_and_duplicate_names() {
        assert!(ColumnNames::new(["a<b"]).is_err());
        assert!(ColumnNames::new(["ok", "x]"]).is_err());
        assert!(ColumnNames::new([""]).is_err());
        assert!(ColumnNames::new([" padded"]).is_err());
        assert!(ColumnNames::new(["a", "a"]).is_err());
    }

    #[test]
    fn test_indexed_names() {
        let columns = ColumnNames::indexed(3);
        let names: Vec<&str> = columns.iter().collect();
        assert_eq!(names, vec!["x0", "x1", "x2"]);
        assert_eq!(columns.index_of("x2"), Some(2));
    }

    #[test]
    fn test_deserialize_validates() {
        let columns: ColumnNames = serde_json::from_str(r#"["petal length", "width"]"#).unwrap();
        assert_eq!(columns.index_of("petal length"), Some(0));
        assert!(serde_json::from_str::<ColumnNames>(r#"["a", "a"]"#).is_err());
    }
}
