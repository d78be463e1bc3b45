//! Resource names and REST wire types for the Pub/Sub v1 API.

use serde::Serialize;
use std::fmt;

/// Handle to a topic inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHandle {
    /// The GCP project ID
    pub project: String,
    /// The topic name
    pub topic: String,
}

impl TopicHandle {
    /// Create a handle for `topic` in `project`.
    pub fn new(project: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            topic: topic.into(),
        }
    }

    /// Fully qualified resource name.
    pub fn resource_name(&self) -> String {
        topic_name(&self.project, &self.topic)
    }
}

impl fmt::Display for TopicHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/topics/{}", self.project, self.topic)
    }
}

/// Format a topic resource name.
pub fn topic_name(project: &str, topic: &str) -> String {
    format!("projects/{}/topics/{}", project, topic)
}

/// Format a subscription resource name.
pub fn subscription_name(project: &str, subscription: &str) -> String {
    format!("projects/{}/subscriptions/{}", project, subscription)
}

/// Topic body for `PUT /v1/projects/{project}/topics/{topic}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic name (projects/{project}/topics/{topic}).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Subscription body for `PUT /v1/projects/{project}/subscriptions/{subscription}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription name (projects/{project}/subscriptions/{subscription}).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Topic name (projects/{project}/topics/{topic}).
    pub topic: String,
    /// Push configuration; absent for pull subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_config: Option<PushConfig>,
}

/// Push configuration for a subscription.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConfig {
    /// HTTP endpoint for push delivery.
    pub push_endpoint: String,
}
