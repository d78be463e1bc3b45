//! Error types for pubsubc.

use thiserror::Error;

/// Configuration string errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The string has a project but no topics (or nothing at all).
    #[error("{source_hint}: Expected at least 1 topic to be defined")]
    NoTopics {
        /// Where the configuration came from.
        source_hint: String,
    },
}

/// Errors returned by the Pub/Sub administrative API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The project ID is empty.
    #[error("project ID is empty")]
    EmptyProject,

    /// No emulator address is configured.
    #[error("emulator host is not set (export PUBSUB_EMULATOR_HOST)")]
    EmulatorHostNotSet,

    /// Transport level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The emulator answered with a non-success status.
    #[error("unexpected response ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

/// Errors raised while provisioning a single project.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Could not establish a session for the project. Fatal for the run.
    #[error("Unable to create client to project {project:?}: {source}")]
    Connect {
        /// Project ID.
        project: String,
        /// Underlying API error.
        source: ApiError,
    },

    /// Topic existence check failed.
    #[error("Failed to check existence of topic {topic:?} for project {project:?}: {source}")]
    TopicLookup {
        /// Project ID.
        project: String,
        /// Topic name.
        topic: String,
        /// Underlying API error.
        source: ApiError,
    },

    /// Topic creation failed.
    #[error("Unable to create topic {topic:?} for project {project:?}: {source}")]
    CreateTopic {
        /// Project ID.
        project: String,
        /// Topic name.
        topic: String,
        /// Underlying API error.
        source: ApiError,
    },

    /// Pull subscription creation failed.
    #[error("Unable to create subscription {subscription:?} on topic {topic:?} for project {project:?}: {source}")]
    CreateSubscription {
        /// Project ID.
        project: String,
        /// Topic name.
        topic: String,
        /// Subscription name.
        subscription: String,
        /// Underlying API error.
        source: ApiError,
    },

    /// Push subscription creation failed.
    #[error("Unable to create push subscription {subscription:?} on topic {topic:?} for project {project:?} using push endpoint {endpoint:?}: {source}")]
    CreatePushSubscription {
        /// Project ID.
        project: String,
        /// Topic name.
        topic: String,
        /// Subscription name.
        subscription: String,
        /// Full push endpoint URL.
        endpoint: String,
        /// Underlying API error.
        source: ApiError,
    },
}

impl ProvisionError {
    /// Connection failures abort the whole run; everything else only aborts the project.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProvisionError::Connect { .. })
    }
}

/// Container runtime errors.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Could not construct a runtime client.
    #[error("Unable to create Docker client: {0}")]
    Client(String),

    /// The runtime could not be reached at all.
    #[error("Unable to connect to Docker: {0}")]
    Unreachable(String),

    /// The runtime answered but listing failed.
    #[error("Unable to fetch Docker containers: {0}")]
    List(String),
}

impl DiscoveryError {
    /// Whether the runtime is simply not there.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, DiscoveryError::Unreachable(_))
    }
}
