use super::helpers::{parse_rows, require_columns};
use console::style;
use rulefmt_lib::{parse, Config};

pub fn handle_eval_command(
    config: &Config,
    text: &str,
    rows: &[String],
    columns: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let columns = require_columns(config, columns)?;
    let rule = parse(text, &columns)?;

    let values = parse_rows(rows, columns.len())?;

    let results = rule.evaluate_batch(&values)?;
    let matched = results.iter().filter(|r| **r).count();

    for (row, result) in rows.iter().zip(&results) {
        let verdict = if *result {
            style("true").green()
        } else {
            style("false").red()
        };
        println!("{}\t{}", verdict, row);
    }

    if !quiet {
        eprintln!(
            "{} {}/{} rows matched",
            style(">>>").cyan(),
            style(matched).bold(),
            results.len()
        );
    }
    Ok(())
}
