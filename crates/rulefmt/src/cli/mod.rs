pub mod eval;
pub mod format;
pub mod inspect;
pub mod parse;
mod helpers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulefmt")]
#[command(about = "Format, parse and evaluate Boolean classification rules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to rulefmt.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the text form of a JSON rule tree")]
    Format {
        #[arg(help = "JSON rule file, or - for stdin")]
        input: PathBuf,

        #[arg(long, help = "Comma-separated column names")]
        columns: Option<String>,

        #[arg(long, help = "Decimal places for thresholds")]
        precision: Option<u32>,
    },

    #[command(about = "Parse rule text into a JSON rule tree")]
    Parse {
        #[arg(help = "Rule text, e.g. 'And(~[a<12.0], [c<16.0])'")]
        text: String,

        #[arg(long, help = "Comma-separated column names")]
        columns: Option<String>,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },

    #[command(about = "Show the canonical form and statistics of a rule")]
    Inspect {
        #[arg(help = "Rule text")]
        text: String,

        #[arg(long, help = "Comma-separated column names")]
        columns: Option<String>,
    },

    #[command(about = "Evaluate a rule on rows of feature values")]
    Eval {
        #[arg(help = "Rule text")]
        text: String,

        #[arg(long = "row", short = 'r', required = true, help = "Comma-separated feature values, one flag per row")]
        rows: Vec<String>,

        #[arg(long, help = "Comma-separated column names")]
        columns: Option<String>,
    },
}
