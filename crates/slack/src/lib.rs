//! Slack Web API clients.
//!
//! Three feature clients are composed from one [`SlackTransport`]:
//!
//! - [`MessageClient`] posts chat messages.
//! - [`CanvasClient`] replaces canvas content and reads canvas metadata.
//! - [`SlackListClient`] reads a list through its CSV export and changes it
//!   through workflow webhooks, including full synchronization against a
//!   desired set of item names.
//!
//! Configuration comes from environment variables ([`SlackConfig`]). All
//! logging goes through `tracing`; [`telemetry::init`] installs the default
//! console and file sinks.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod canvas;
pub mod config;
pub mod error;
pub mod lists;
pub mod messages;
pub mod telemetry;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod transport;
pub mod types;

pub use canvas::CanvasClient;
pub use config::{ConfigError, ListConfig, LogConfig, LogFormat, SlackConfig};
pub use error::SlackError;
pub use lists::{ItemOutcome, SlackListClient, SyncReport};
pub use messages::MessageClient;
pub use transport::SlackTransport;
