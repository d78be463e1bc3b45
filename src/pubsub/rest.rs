//! REST client for the Pub/Sub emulator.
//!
//! Only the administrative endpoints provisioning needs are used:
//!
//! - `GET /v1/projects/{project}/topics/{topic}` - Get topic details (404 when absent)
//! - `PUT /v1/projects/{project}/topics/{topic}` - Create a topic
//! - `PUT /v1/projects/{project}/subscriptions/{subscription}` - Create a subscription

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use urlencoding::encode;

use crate::config::{PushConfig, Settings};
use crate::error::ApiError;
use crate::pubsub::types::{self, Subscription, Topic, TopicHandle};
use crate::pubsub::{AdminClient, AdminSession};

/// Admin client for an emulator reachable over HTTP.
#[derive(Debug, Clone)]
pub struct EmulatorClient {
    base_url: Option<String>,
    timeout: Duration,
}

impl EmulatorClient {
    /// Create a client from the ambient settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.emulator_host.as_deref().map(base_url),
            timeout: settings.request_timeout,
        }
    }

    /// Create a client for an explicit emulator address.
    pub fn with_host(host: &str) -> Self {
        Self {
            base_url: Some(base_url(host)),
            timeout: Settings::default().request_timeout,
        }
    }
}

/// Turn `host:port` into a base URL, keeping an explicit scheme if present.
fn base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[async_trait]
impl AdminClient for EmulatorClient {
    type Session = EmulatorSession;

    async fn connect(&self, project_id: &str) -> Result<EmulatorSession, ApiError> {
        if project_id.is_empty() {
            return Err(ApiError::EmptyProject);
        }
        let base_url = self.base_url.clone().ok_or(ApiError::EmulatorHostNotSet)?;

        let http = Client::builder().timeout(self.timeout).build()?;
        debug!("Client connected to {} with project ID {:?}", base_url, project_id);

        Ok(EmulatorSession {
            http,
            base_url,
            project_id: project_id.to_string(),
        })
    }
}

/// Session scoped to one project.
#[derive(Debug)]
pub struct EmulatorSession {
    http: Client,
    base_url: String,
    project_id: String,
}

impl EmulatorSession {
    fn topic_url(&self, topic_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/topics/{}",
            self.base_url,
            encode(&self.project_id),
            encode(topic_id)
        )
    }

    fn subscription_url(&self, subscription_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/subscriptions/{}",
            self.base_url,
            encode(&self.project_id),
            encode(subscription_id)
        )
    }
}

/// Map a non-success response to [`ApiError::Status`].
async fn check(response: Response) -> Result<Response, ApiError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    Ok(response)
}

#[async_trait]
impl AdminSession for EmulatorSession {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn topic_exists(&self, topic_id: &str) -> Result<bool, ApiError> {
        let response = self.http.get(self.topic_url(topic_id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }

    async fn create_topic(&self, topic_id: &str) -> Result<TopicHandle, ApiError> {
        let handle = self.topic(topic_id);
        let body = Topic {
            name: Some(handle.resource_name()),
        };

        let response = self
            .http
            .put(self.topic_url(topic_id))
            .json(&body)
            .send()
            .await?;
        check(response).await?;

        Ok(handle)
    }

    async fn create_subscription(
        &self,
        subscription_id: &str,
        topic: &TopicHandle,
        push_config: Option<&PushConfig>,
    ) -> Result<(), ApiError> {
        let body = Subscription {
            name: Some(types::subscription_name(&self.project_id, subscription_id)),
            topic: topic.resource_name(),
            push_config: push_config.map(|config| types::PushConfig {
                push_endpoint: config.endpoint.clone(),
            }),
        };

        let response = self
            .http
            .put(self.subscription_url(subscription_id))
            .json(&body)
            .send()
            .await?;
        check(response).await?;

        Ok(())
    }

    async fn close(&self) {
        debug!("Closing client for project ID {:?}", self.project_id);
    }
}
