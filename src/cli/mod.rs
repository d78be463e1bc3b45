//! Command-line interface for pubsubc.

/// Command execution handlers
pub mod commands;
/// Output formatting utilities
pub mod output;

use std::io::{self, Write};

use clap::{CommandFactory, Parser};

/// Configuration examples appended to the usage text.
const CONFIG_HELP: &str = r#"Configure with environment variables:
   PUBSUB_PROJECT1="project1,topic1,topic2:subscription1,topic3:subscription2+endpoint1"

Configure with Docker labels:
   pubsubc.config1="project1,topic1,topic2:subscription1,topic3:subscription2+endpoint1"

Push endpoints use '|' in place of ':' and are always delivered over http://,
e.g. "subscription2+app|8080/push" pushes to http://app:8080/push.

The emulator address is read from PUBSUB_EMULATOR_HOST."#;

/// Command-line interface for pubsubc
#[derive(Parser, Debug)]
#[command(name = "pubsubc")]
#[command(
    about = "Create Pub/Sub emulator topics and subscriptions from env vars and Docker labels",
    long_about = None,
    after_help = CONFIG_HELP,
    disable_version_flag = true
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Display version information
    #[arg(long)]
    pub version: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Write the usage text to `out`.
    pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", Self::command().render_help())?;
        Ok(())
    }
}

/// Build identification printed by `--version`.
pub fn version_string() -> String {
    format!(
        "pubsubc - build {} ({}) running on {}",
        env!("PUBSUBC_REVISION"),
        env!("PUBSUBC_COMMIT_HASH"),
        env!("PUBSUBC_TARGET")
    )
}
