// Provision command implementation
use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Settings;
use crate::discovery::{discover_docker, discover_env};
use crate::provision::{Provisioner, RunSummary};
use crate::pubsub::EmulatorClient;

/// Discover every configuration and provision it against the emulator.
///
/// Environment variables are processed before Docker labels. Only a failure
/// to connect to the emulator is returned as an error.
pub async fn execute(settings: &Settings) -> Result<RunSummary> {
    let provisioner = Provisioner::new(EmulatorClient::new(settings));
    let mut summary = RunSummary::default();

    provisioner
        .run_into(discover_env(settings), &mut summary)
        .await
        .context("Provisioning from environment variables aborted")?;

    provisioner
        .run_into(discover_docker(settings).await, &mut summary)
        .await
        .context("Provisioning from Docker labels aborted")?;

    debug!(
        discovered = summary.discovered,
        provisioned = summary.provisioned,
        failed = summary.failed,
        skipped = summary.skipped,
        "Provisioning finished"
    );

    Ok(summary)
}
