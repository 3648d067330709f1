use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about an assistant session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether the session is currently running
    pub is_running: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Number of video frames sent to the service
    pub frames_sent: usize,

    /// Number of final transcripts forwarded over an open connection
    pub transcripts_sent: usize,

    /// Number of inbound messages dispatched
    pub messages_received: usize,
}
