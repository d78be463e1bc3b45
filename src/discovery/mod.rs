//! Discovery of raw configuration strings.
//!
//! Configurations come from numbered environment variables first, then from
//! labels on running containers. Each one carries a source hint that points
//! back to where it was found.

use tracing::debug;

use crate::config::Settings;

pub mod docker;

pub use docker::{discover_docker, discover_labels, ContainerRuntime, DockerRuntime, LabeledContainer};

/// A raw configuration string and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredConfig {
    /// Unparsed configuration string.
    pub raw: String,
    /// Human readable origin, e.g. `PUBSUB_PROJECT1`.
    pub source_hint: String,
}

impl DiscoveredConfig {
    /// Pair a raw configuration with its source hint.
    pub fn new(raw: impl Into<String>, source_hint: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            source_hint: source_hint.into(),
        }
    }
}

/// Read `PREFIX_PROJECT1`, `PREFIX_PROJECT2`, ... from the process environment.
pub fn discover_env(settings: &Settings) -> Vec<DiscoveredConfig> {
    discover_with(settings, |key| std::env::var(key).ok())
}

/// Read numbered project variables through `lookup`.
///
/// Stops at the first variable that is missing or empty, so a gap hides
/// every later number.
pub fn discover_with<F>(settings: &Settings, lookup: F) -> Vec<DiscoveredConfig>
where
    F: Fn(&str) -> Option<String>,
{
    debug!("Looking for environment variable configs");

    let mut configs = Vec::new();
    for n in 1.. {
        let name = settings.project_var(n);
        match lookup(&name).filter(|value| !value.is_empty()) {
            Some(value) => configs.push(DiscoveredConfig::new(value, name)),
            None => break,
        }
    }
    configs
}
