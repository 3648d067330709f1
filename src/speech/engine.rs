use std::fmt;

use anyhow::Result;
use tokio::sync::mpsc;

/// Errors a recognition engine can signal mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The run was aborted on purpose (expected during stop).
    Aborted,
    /// Nothing was said; engines raise this routinely.
    NoSpeech,
    /// Anything else the engine reports.
    Engine(String),
}

impl SpeechError {
    /// Benign errors end a run without warranting a recovery restart.
    pub fn is_benign(&self) -> bool {
        matches!(self, SpeechError::Aborted | SpeechError::NoSpeech)
    }
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Aborted => write!(f, "aborted"),
            SpeechError::NoSpeech => write!(f, "no-speech"),
            SpeechError::Engine(msg) => write!(f, "{}", msg),
        }
    }
}

/// Events a recognition engine emits during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A recognition result. Interim results are live previews; final
    /// results are committed transcripts.
    Transcript { text: String, is_final: bool },
    /// The engine ended the run on its own; it will not emit further
    /// events until restarted.
    Ended,
    Error(SpeechError),
}

/// Continuous speech-to-text engine
///
/// Engines stop spontaneously; the speech channel owns the restart policy.
/// Each `start` call begins a fresh recognition run.
#[async_trait::async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Begin a recognition run
    ///
    /// Returns a channel receiver that will receive events for this run
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<SpeechEvent>>;

    /// Stop the current run
    async fn stop(&mut self) -> Result<()>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}
