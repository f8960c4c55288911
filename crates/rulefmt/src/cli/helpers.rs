use anyhow::{bail, Context};
use rulefmt_lib::util::format::{parse_name_list, parse_row};
use rulefmt_lib::{ColumnNames, Config, Result, Rule, RulefmtError};
use std::io::Read;
use std::path::Path;

/// Columns from `--columns`, falling back to the configured list.
pub fn resolve_columns(config: &Config, columns: Option<String>) -> Result<Option<ColumnNames>> {
    match columns {
        Some(list) => ColumnNames::new(parse_name_list(&list)).map(Some),
        None => Ok(config.columns.clone()),
    }
}

/// Text input needs names to resolve leaves, so there is no fallback.
pub fn require_columns(config: &Config, columns: Option<String>) -> Result<ColumnNames> {
    resolve_columns(config, columns)?.ok_or_else(|| {
        RulefmtError::Config(
            "No column names given; pass --columns or set `columns` in rulefmt.toml".to_string(),
        )
    })
}

/// Columns for printing a JSON tree: explicit or configured names, else
/// `x0..x{n-1}` wide enough for every column the rule references.
pub fn columns_for_rule(config: &Config, columns: Option<String>, rule: &Rule) -> Result<ColumnNames> {
    match resolve_columns(config, columns)? {
        Some(columns) => Ok(columns),
        None => {
            let width = rule.columns().last().map_or(0, |max| max + 1);
            log::info!("No column names configured, using x0..x{}", width.saturating_sub(1));
            Ok(ColumnNames::indexed(width))
        }
    }
}

/// Parse `--row` values; every row must have one value per column.
pub fn parse_rows(rows: &[String], width: usize) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut values = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let parsed = parse_row(row)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Row {}", i + 1))?;
        if parsed.len() != width {
            bail!("Row {} has {} values, expected {}", i + 1, parsed.len(), width);
        }
        values.push(parsed);
    }
    Ok(values)
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
