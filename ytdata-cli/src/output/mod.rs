//! Output formatting for CLI.

mod json;
mod rows;
mod text;

use std::io::IsTerminal;

use anyhow::Result;
use serde::Serialize;
use ytdata_core::Tabular;

pub use json::JsonFormatter;
pub use rows::{ChannelIdRow, ChannelRow, HitRow, VideoIdRow};
pub use text::TextFormatter;

use crate::{Cli, OutputFormat};

/// Whether stdout gets ANSI colors.
pub fn use_colors(cli: &Cli) -> bool {
    !cli.no_color && std::io::stdout().is_terminal()
}

/// Prints rows as a table or a JSON array, per `--format`.
pub fn print_rows<T: Tabular + Serialize>(rows: &[T], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(use_colors(cli));
            print!("{}", formatter.table(rows));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&rows)?);
        }
    }
    Ok(())
}

/// Prints a summary line to stderr unless `--quiet`.
pub fn print_summary(cli: &Cli, summary: &str) {
    if !cli.quiet {
        eprintln!("{summary}");
    }
}
