//! Configuration for pubsubc.
//!
//! Two kinds of configuration live here: the ambient [`Settings`] the tool
//! runs with, and the provisioning grammar decoded by [`parser`].

use std::time::Duration;

pub mod parser;

pub use parser::{ProjectConfig, PushConfig, SubscriptionSpec, Topics};

/// Prefix of the numbered project variables (`PUBSUB_PROJECT1`, ...).
pub const DEFAULT_ENV_PREFIX: &str = "PUBSUB";

/// First dot-separated segment of container label keys we pick up.
pub const DEFAULT_LABEL_IDENTIFIER: &str = "pubsubc";

/// Variable holding the emulator address, shared with the Google client libraries.
pub const EMULATOR_HOST_ENV: &str = "PUBSUB_EMULATOR_HOST";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ambient settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Prefix of the numbered project variables.
    pub env_prefix: String,
    /// Label key identifier.
    pub label_identifier: String,
    /// Emulator address, `host:port` or a full URL.
    pub emulator_host: Option<String>,
    /// Timeout applied to each admin API request.
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            label_identifier: DEFAULT_LABEL_IDENTIFIER.to_string(),
            emulator_host: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            emulator_host: lookup(EMULATOR_HOST_ENV).filter(|host| !host.is_empty()),
            ..Self::default()
        }
    }

    /// Name of the `n`th numbered project variable.
    pub fn project_var(&self, n: usize) -> String {
        format!("{}_PROJECT{}", self.env_prefix, n)
    }
}
