// Commands module
/// Provisioning run
pub mod provision;

use std::process::ExitCode;

use crate::cli::{output::*, version_string, Cli};
use crate::config::Settings;

/// Execute the CLI invocation
pub async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.version {
        println!("{}", version_string());
        return Ok(ExitCode::SUCCESS);
    }

    let summary = provision::execute(&Settings::from_env()).await?;

    if summary.is_empty() {
        write_no_configuration(&mut std::io::stdout().lock())?;
        return Ok(ExitCode::FAILURE);
    }

    if cli.debug {
        print_info(&summary_line(&summary));
    }

    Ok(ExitCode::SUCCESS)
}
