//! Assistant session management
//!
//! This module provides the `AssistantSession` abstraction that manages:
//! - Session start/stop lifecycle (including ctrl-c teardown)
//! - Camera capture and the outbound frame sampler
//! - The speech channel and transcript forwarding
//! - The service connection and inbound message dispatch

mod config;
mod controller;
mod stats;

pub use config::SessionConfig;
pub use controller::AssistantSession;
pub use stats::SessionStats;
