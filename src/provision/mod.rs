//! Provisioning of topics and subscriptions.
//!
//! [`provision`] ensures the resources of one project exist. [`Provisioner`]
//! drives it for every discovered configuration and tallies the outcome in a
//! [`RunSummary`].

use tracing::{debug, warn};

use crate::config::{ProjectConfig, SubscriptionSpec, Topics};
use crate::discovery::DiscoveredConfig;
use crate::error::ProvisionError;
use crate::pubsub::{AdminClient, AdminSession};

/// Outcome of processing a batch of configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Configurations handed to the provisioner.
    pub discovered: usize,
    /// Malformed configurations that were skipped.
    pub skipped: usize,
    /// Configurations whose provisioning failed part way.
    pub failed: usize,
    /// Configurations provisioned completely.
    pub provisioned: usize,
}

impl RunSummary {
    /// Configurations that reached the emulator.
    pub fn attempted(&self) -> usize {
        self.failed + self.provisioned
    }

    /// True when no configuration was found at all.
    pub fn is_empty(&self) -> bool {
        self.discovered == 0
    }
}

/// Ensure the topics and subscriptions of one project exist.
///
/// Topics are looked up before being created. Subscriptions are created
/// unconditionally, so provisioning an existing subscription again fails.
/// The first failure aborts the project; resources created before it stay.
pub async fn provision<C>(client: &C, project_id: &str, topics: &Topics) -> Result<(), ProvisionError>
where
    C: AdminClient + ?Sized,
{
    let session = client
        .connect(project_id)
        .await
        .map_err(|source| ProvisionError::Connect {
            project: project_id.to_string(),
            source,
        })?;

    let result = provision_topics(&session, topics).await;
    session.close().await;
    result
}

async fn provision_topics<S>(session: &S, topics: &Topics) -> Result<(), ProvisionError>
where
    S: AdminSession,
{
    let project = session.project_id();

    for (topic_id, subscriptions) in topics {
        debug!("  Checking for existing topic {:?}", topic_id);
        let exists = session
            .topic_exists(topic_id)
            .await
            .map_err(|source| ProvisionError::TopicLookup {
                project: project.to_string(),
                topic: topic_id.clone(),
                source,
            })?;

        let topic = if exists {
            debug!("  Topic {:?} already exists", topic_id);
            session.topic(topic_id)
        } else {
            debug!("  Creating topic {:?}", topic_id);
            session
                .create_topic(topic_id)
                .await
                .map_err(|source| ProvisionError::CreateTopic {
                    project: project.to_string(),
                    topic: topic_id.clone(),
                    source,
                })?
        };

        for raw in subscriptions {
            match SubscriptionSpec::parse(raw) {
                SubscriptionSpec::Push { name, push_config } => {
                    debug!(
                        "    Creating push subscription {:?} with target {:?}",
                        name, push_config.endpoint
                    );
                    session
                        .create_subscription(&name, &topic, Some(&push_config))
                        .await
                        .map_err(|source| ProvisionError::CreatePushSubscription {
                            project: project.to_string(),
                            topic: topic_id.clone(),
                            subscription: name.clone(),
                            endpoint: push_config.endpoint.clone(),
                            source,
                        })?;
                }
                SubscriptionSpec::Pull { name } => {
                    debug!("    Creating pull subscription {:?}", name);
                    session
                        .create_subscription(&name, &topic, None)
                        .await
                        .map_err(|source| ProvisionError::CreateSubscription {
                            project: project.to_string(),
                            topic: topic_id.clone(),
                            subscription: name.clone(),
                            source,
                        })?;
                }
            }
        }
    }

    Ok(())
}

/// Runs discovered configurations against an admin client, one at a time.
pub struct Provisioner<C> {
    client: C,
}

impl<C: AdminClient> Provisioner<C> {
    /// Create a provisioner backed by `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Process configurations in order, starting from an empty summary.
    pub async fn run<I>(&self, configs: I) -> Result<RunSummary, ProvisionError>
    where
        I: IntoIterator<Item = DiscoveredConfig>,
    {
        let mut summary = RunSummary::default();
        self.run_into(configs, &mut summary).await?;
        Ok(summary)
    }

    /// Process configurations in order, adding to `summary`.
    ///
    /// Only a connection failure is returned; every other problem is logged
    /// and processing moves on to the next configuration.
    pub async fn run_into<I>(&self, configs: I, summary: &mut RunSummary) -> Result<(), ProvisionError>
    where
        I: IntoIterator<Item = DiscoveredConfig>,
    {
        for config in configs {
            self.process(&config, summary).await?;
        }
        Ok(())
    }

    /// Parse and provision a single configuration.
    pub async fn process(
        &self,
        config: &DiscoveredConfig,
        summary: &mut RunSummary,
    ) -> Result<(), ProvisionError> {
        summary.discovered += 1;

        let project = match ProjectConfig::parse(&config.raw, &config.source_hint) {
            Ok(project) => project,
            Err(e) => {
                warn!("{}", e);
                summary.skipped += 1;
                return Ok(());
            }
        };

        match provision(&self.client, &project.project_id, &project.topics).await {
            Ok(()) => {
                summary.provisioned += 1;
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("{}: When creating resources: {}", config.source_hint, e);
                summary.failed += 1;
                Ok(())
            }
        }
    }
}
