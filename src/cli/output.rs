// Output formatting utilities for CLI
use std::io::{self, Write};

use colored::*;

use crate::cli::Cli;
use crate::provision::RunSummary;

/// Write the "nothing configured" guidance followed by the usage text.
///
/// Both go to the same stream so they stay together.
pub fn write_no_configuration<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        "✗".red().bold(),
        "No Pub/Sub configurations found".red()
    )?;
    Cli::write_usage(out)
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// One-line description of a finished run.
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "{} configuration(s): {} provisioned, {} failed, {} skipped",
        summary.discovered, summary.provisioned, summary.failed, summary.skipped
    )
}
