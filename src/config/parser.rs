//! Parser for the compact configuration grammar.
//!
//! ```text
//! config       = project "," topic { "," topic }
//! topic        = name { ":" subscription }
//! subscription = name [ "+" endpoint ]
//! ```
//!
//! The endpoint uses `|` in place of `:` since `:` already separates
//! subscriptions, e.g. `sub+host|8080/path` pushes to `http://host:8080/path`.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Topic name mapped to its raw subscription specs, in declaration order.
pub type Topics = HashMap<String, Vec<String>>;

/// A decoded configuration string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project the resources live in. Not validated locally.
    pub project_id: String,
    /// Topics to ensure, with their subscriptions.
    pub topics: Topics,
}

impl ProjectConfig {
    /// Parse a raw configuration string.
    ///
    /// `source_hint` is only used to label the error.
    pub fn parse(raw: &str, source_hint: &str) -> Result<Self, ConfigError> {
        let mut parts = raw.split(',');
        let project_id = parts.next().unwrap_or_default();

        let mut topics = Topics::new();
        for topic_spec in parts {
            let mut tokens = topic_spec.split(':');
            let topic = tokens.next().unwrap_or_default().to_string();
            // Later definitions of the same topic replace earlier ones
            topics.insert(topic, tokens.map(str::to_string).collect());
        }

        if topics.is_empty() {
            return Err(ConfigError::NoTopics {
                source_hint: source_hint.to_string(),
            });
        }

        Ok(Self {
            project_id: project_id.to_string(),
            topics,
        })
    }
}

/// Push delivery settings for a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushConfig {
    /// Full endpoint URL.
    pub endpoint: String,
}

/// A decoded subscription spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionSpec {
    /// Consumers poll the subscription.
    Pull {
        /// Subscription name.
        name: String,
    },
    /// The emulator delivers to an HTTP endpoint.
    Push {
        /// Subscription name.
        name: String,
        /// Where messages are delivered.
        push_config: PushConfig,
    },
}

impl SubscriptionSpec {
    /// Decode a raw subscription spec.
    ///
    /// Only the first `+` separates name from endpoint and only the first `|`
    /// is turned back into `:`. The endpoint is always `http://`; a scheme
    /// encoded in the spec is not detected.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('+') {
            Some((name, encoded)) => SubscriptionSpec::Push {
                name: name.to_string(),
                push_config: PushConfig {
                    endpoint: format!("http://{}", encoded.replacen('|', ":", 1)),
                },
            },
            None => SubscriptionSpec::Pull {
                name: spec.to_string(),
            },
        }
    }

    /// Subscription name.
    pub fn name(&self) -> &str {
        match self {
            SubscriptionSpec::Pull { name } => name,
            SubscriptionSpec::Push { name, .. } => name,
        }
    }

    /// Push settings, if this is a push subscription.
    pub fn push_config(&self) -> Option<&PushConfig> {
        match self {
            SubscriptionSpec::Pull { .. } => None,
            SubscriptionSpec::Push { push_config, .. } => Some(push_config),
        }
    }
}
