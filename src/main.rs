use std::process::ExitCode;

use pubsubc::cli::{commands, Cli};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize tracing; --debug only opens up our own traces
    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    let filter = Targets::new()
        .with_target("pubsubc", level)
        .with_default(Level::WARN);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();

    commands::execute(cli).await
}
