//! # pubsubc - Pub/Sub emulator provisioner
//!
//! Creates topics and subscriptions on a local Pub/Sub emulator from
//! configuration strings found in environment variables and container labels.
//!
//! ```text
//! PUBSUB_PROJECT1="project1,topic1,topic2:subscription1,topic3:subscription2+endpoint1|8080"
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod provision;
pub mod pubsub;

pub use error::{ApiError, ConfigError, DiscoveryError, ProvisionError};
