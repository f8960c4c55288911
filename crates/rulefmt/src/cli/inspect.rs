use super::helpers::require_columns;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use rulefmt_lib::{format_with, parse, Config, Rule};

pub fn handle_inspect_command(config: &Config, text: &str, columns: Option<String>) -> anyhow::Result<()> {
    let columns = require_columns(config, columns)?;
    let rule = parse(text, &columns)?;
    let canonical = format_with(&rule, &columns, config.format_options(None)?)?;

    println!("\n{}", style("Rule").bold().cyan());
    println!("{}", style("─".repeat(80)).dim());
    println!("{}\n", canonical);

    if canonical != text.trim() {
        println!("{}\n", style("Input differs from the canonical form").yellow());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Property").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    table.add_row(vec![Cell::new("Root"), Cell::new(root_kind(&rule))]);
    table.add_row(vec![Cell::new("Depth"), Cell::new(rule.depth())]);
    table.add_row(vec![Cell::new("Leaves"), Cell::new(rule.leaf_count())]);
    table.add_row(vec![Cell::new("Negations"), Cell::new(rule.negation_count())]);

    let used: Vec<&str> = rule
        .columns()
        .into_iter()
        .filter_map(|index| columns.name(index).ok())
        .collect();
    table.add_row(vec![Cell::new("Columns"), Cell::new(used.join(", "))]);

    println!("{table}");
    Ok(())
}

fn root_kind(rule: &Rule) -> String {
    match rule {
        Rule::Leaf(_) => "predicate".to_string(),
        Rule::Node { operator, children } => format!("{} ({} children)", operator, children.len()),
    }
}
