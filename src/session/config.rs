use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an assistant session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opaque client identifier, generated once per process
    pub client_id: String,

    /// Base WebSocket URL of the assistant service (e.g. "ws://localhost:8000")
    pub server_url: String,

    /// Interval between captured frames
    /// Default: 1000ms (one frame per second)
    pub capture_period: Duration,

    /// JPEG quality for outbound frames (0-100)
    pub jpeg_quality: u8,

    /// Fixed delay before a reconnect attempt after an unexpected drop
    pub reconnect_delay: Duration,

    /// Delay before restarting recognition after the engine ends a run
    pub restart_after_end: Duration,

    /// Delay before restarting recognition after an engine error
    pub restart_after_error: Duration,
}

impl SessionConfig {
    /// Full endpoint for this session's connection.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/ws/emotion/{}",
            self.server_url.trim_end_matches('/'),
            self.client_id
        )
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            client_id: format!("client_{}", uuid::Uuid::new_v4().simple()),
            server_url: "ws://localhost:8000".to_string(),
            capture_period: Duration::from_millis(1000), // One frame per second
            jpeg_quality: 70,
            reconnect_delay: Duration::from_millis(3000),
            restart_after_end: Duration::from_millis(500),
            restart_after_error: Duration::from_millis(2000),
        }
    }
}
