//! Configuration from container labels.
//!
//! Any label on a running container whose key starts with the label
//! identifier segment (`pubsubc.config1`, `pubsubc.orders`, ...) carries a
//! configuration string as its value.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bollard::container::ListContainersOptions;
use bollard::Docker;
use tracing::{debug, warn};

use super::DiscoveredConfig;
use crate::config::Settings;
use crate::error::DiscoveryError;

/// Length of the container id shown in source hints.
const SHORT_ID_LEN: usize = 10;

const CONNECT_TIMEOUT_SECS: u64 = 120;

/// A running container and its labels.
#[derive(Debug, Clone, Default)]
pub struct LabeledContainer {
    /// Full container id.
    pub id: String,
    /// Container names as reported by the runtime.
    pub names: Vec<String>,
    /// Label key to value.
    pub labels: HashMap<String, String>,
}

impl LabeledContainer {
    /// Abbreviated id used in source hints.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// Read-only view of a container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List currently running containers.
    async fn running_containers(&self) -> Result<Vec<LabeledContainer>, DiscoveryError>;
}

/// Implementation based on the local [Docker](https://www.docker.com/) daemon.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using local defaults, honouring `DOCKER_HOST`.
    pub fn connect() -> Result<Self, DiscoveryError> {
        let docker = Docker::connect_with_local_defaults().map_err(classify_connect)?;
        Ok(Self { docker })
    }

    /// Connect to an explicit unix socket, e.g. `unix:///var/run/docker.sock`.
    #[cfg(unix)]
    pub fn connect_socket(path: &str) -> Result<Self, DiscoveryError> {
        let docker = Docker::connect_with_unix(
            path,
            CONNECT_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(classify_connect)?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn running_containers(&self) -> Result<Vec<LabeledContainer>, DiscoveryError> {
        // `all: false` restricts the listing to running containers
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };

        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(classify)?;

        Ok(containers
            .into_iter()
            .map(|container| LabeledContainer {
                id: container.id.unwrap_or_default(),
                names: container.names.unwrap_or_default(),
                labels: container.labels.unwrap_or_default(),
            })
            .collect())
    }
}

/// The daemon answering with an error status means it is reachable.
fn classify(err: bollard::errors::Error) -> DiscoveryError {
    match err {
        bollard::errors::Error::DockerResponseServerError { .. } => {
            DiscoveryError::List(err.to_string())
        }
        other => DiscoveryError::Unreachable(other.to_string()),
    }
}

/// A missing socket means there is no daemon on this host.
fn classify_connect(err: bollard::errors::Error) -> DiscoveryError {
    match err {
        bollard::errors::Error::SocketNotFoundError(_)
        | bollard::errors::Error::IOError { .. } => DiscoveryError::Unreachable(err.to_string()),
        other => DiscoveryError::Client(other.to_string()),
    }
}

/// Collect configurations from the local Docker daemon.
///
/// Never fails: runtime problems are logged and yield no configurations.
pub async fn discover_docker(settings: &Settings) -> Vec<DiscoveredConfig> {
    match DockerRuntime::connect() {
        Ok(runtime) => discover_labels(&runtime, settings).await,
        Err(e) if e.is_unreachable() => {
            debug!("{}", e);
            Vec::new()
        }
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Collect configurations from the labels of running containers.
pub async fn discover_labels<R>(runtime: &R, settings: &Settings) -> Vec<DiscoveredConfig>
where
    R: ContainerRuntime + ?Sized,
{
    let containers = match runtime.running_containers().await {
        Ok(containers) => containers,
        Err(e) if e.is_unreachable() => {
            debug!("{}", e);
            return Vec::new();
        }
        Err(e) => {
            warn!("{}", e);
            return Vec::new();
        }
    };

    debug!("Looking for Docker label configs");

    let mut configs = Vec::new();
    for container in &containers {
        debug!(
            "Found container [{}] names {:?}",
            container.short_id(),
            container.names
        );

        let labels: BTreeMap<_, _> = container.labels.iter().collect();
        for (key, value) in labels {
            if key.split('.').next() == Some(settings.label_identifier.as_str()) {
                configs.push(DiscoveredConfig::new(
                    value.as_str(),
                    format!("{} {}", container.short_id(), key),
                ));
            }
        }
    }
    configs
}
