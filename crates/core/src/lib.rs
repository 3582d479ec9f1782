//! Slack Clients Core - Shared types library.
//!
//! This crate provides the types used across the Slack client components:
//! - `slack` - Web API transport, messaging, canvas and list clients
//! - `cli` - Command-line automation over the list and canvas clients
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no logging.
//! This keeps it lightweight and lets the reconciliation planner be tested
//! without any network stack.
//!
//! # Modules
//!
//! - [`types`] - Slack object IDs, validated webhook URLs, list items and snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
