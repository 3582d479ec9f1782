//! Core types for the Slack clients.
//!
//! This module provides type-safe wrappers for the Slack concepts the clients
//! pass around.

pub mod id;
pub mod item;
pub mod webhook;

pub use id::*;
pub use item::{ListItem, Snapshot};
pub use webhook::{WebhookUrl, WebhookUrlError, is_valid_webhook};
