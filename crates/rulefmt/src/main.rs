mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rulefmt_lib::Config;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::new(cli.config.clone()).context("Failed to load configuration")?;

    match cli.command {
        cli::Commands::Format { input, columns, precision } => {
            cli::format::handle_format_command(&config, &input, columns, precision, cli.quiet)
        }

        cli::Commands::Parse { text, columns, pretty } => {
            cli::parse::handle_parse_command(&config, &text, columns, pretty)
        }

        cli::Commands::Inspect { text, columns } => {
            cli::inspect::handle_inspect_command(&config, &text, columns)
        }

        cli::Commands::Eval { text, rows, columns } => {
            cli::eval::handle_eval_command(&config, &text, &rows, columns, cli.quiet)
        }
    }
}
