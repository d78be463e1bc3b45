//! Pub/Sub administrative API.
//!
//! Provisioning talks to the emulator through two traits:
//! - [`AdminClient`] opens a session scoped to one project
//! - [`AdminSession`] checks and creates topics and subscriptions
//!
//! [`rest::EmulatorClient`] implements them over the HTTP/JSON API.

use async_trait::async_trait;

use crate::config::PushConfig;
use crate::error::ApiError;

pub mod rest;
pub mod types;

pub use rest::EmulatorClient;
pub use types::TopicHandle;

/// Opens project-scoped sessions.
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Session type handed out by [`AdminClient::connect`].
    type Session: AdminSession;

    /// Establish a session for `project_id`.
    async fn connect(&self, project_id: &str) -> Result<Self::Session, ApiError>;
}

/// Administrative operations within one project.
#[async_trait]
pub trait AdminSession: Send + Sync {
    /// Project this session is scoped to.
    fn project_id(&self) -> &str;

    /// Handle for a topic that may or may not exist yet.
    fn topic(&self, topic_id: &str) -> TopicHandle {
        TopicHandle::new(self.project_id(), topic_id)
    }

    /// Whether the topic already exists.
    async fn topic_exists(&self, topic_id: &str) -> Result<bool, ApiError>;

    /// Create a topic.
    async fn create_topic(&self, topic_id: &str) -> Result<TopicHandle, ApiError>;

    /// Create a subscription bound to `topic`. Fails if it already exists.
    async fn create_subscription(
        &self,
        subscription_id: &str,
        topic: &TopicHandle,
        push_config: Option<&PushConfig>,
    ) -> Result<(), ApiError>;

    /// Release the session.
    async fn close(&self);
}
