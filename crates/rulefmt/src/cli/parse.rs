use super::helpers::require_columns;
use rulefmt_lib::{parse, Config};

pub fn handle_parse_command(
    config: &Config,
    text: &str,
    columns: Option<String>,
    pretty: bool,
) -> anyhow::Result<()> {
    let columns = require_columns(config, columns)?;
    let rule = parse(text, &columns)?;

    let json = if pretty {
        serde_json::to_string_pretty(&rule)
    } else {
        serde_json::to_string(&rule)
    }?;

    println!("{}", json);
    Ok(())
}
