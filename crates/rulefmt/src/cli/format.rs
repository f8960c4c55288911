use super::helpers::{columns_for_rule, read_input};
use anyhow::Context;
use console::style;
use rulefmt_lib::{format_with, Config, Rule};
use std::path::Path;

pub fn handle_format_command(
    config: &Config,
    input: &Path,
    columns: Option<String>,
    precision: Option<u32>,
    quiet: bool,
) -> anyhow::Result<()> {
    let content = read_input(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let rule: Rule = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse rule JSON from {}", input.display()))?;

    let columns = columns_for_rule(config, columns, &rule)?;

    let options = config.format_options(precision)?;

    log::debug!("Formatting with precision {}", options.precision);
    let text = format_with(&rule, &columns, options)?;
    if !quiet {
        eprintln!(
            "{} {} leaves, depth {}",
            style(">>>").cyan(),
            style(rule.leaf_count()).bold(),
            rule.depth()
        );
    }
    println!("{}", text);
    Ok(())
}
