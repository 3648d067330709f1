use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::engine::{SpeechEngine, SpeechEvent};

/// Recognition engine that replays a fixed script.
///
/// Each run emits an interim preview then the final transcript for the
/// next scripted line, then ends the run — which exercises the channel's
/// restart path exactly like a real engine that stops between utterances.
/// The script position survives restarts.
pub struct ScriptedEngine {
    lines: Arc<Vec<String>>,
    position: Arc<AtomicUsize>,
    cadence: Duration,
    task: Option<JoinHandle<()>>,
}

impl ScriptedEngine {
    pub fn new(lines: Vec<String>, cadence: Duration) -> Self {
        Self {
            lines: Arc::new(lines),
            position: Arc::new(AtomicUsize::new(0)),
            cadence,
            task: None,
        }
    }
}

#[async_trait::async_trait]
impl SpeechEngine for ScriptedEngine {
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<SpeechEvent>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let lines = Arc::clone(&self.lines);
        let position = Arc::clone(&self.position);
        let cadence = self.cadence;

        let task = tokio::spawn(async move {
            let index = position.fetch_add(1, Ordering::SeqCst);
            let Some(line) = lines.get(index) else {
                // Script exhausted: keep the run open, emit nothing more.
                std::future::pending::<()>().await;
                unreachable!();
            };

            tokio::time::sleep(cadence).await;

            // Interim preview: the first word, the way live engines trickle
            // results in.
            if let Some(word) = line.split_whitespace().next() {
                let _ = tx.send(SpeechEvent::Transcript {
                    text: word.to_string(),
                    is_final: false,
                });
            }

            tokio::time::sleep(cadence).await;
            let _ = tx.send(SpeechEvent::Transcript {
                text: line.clone(),
                is_final: true,
            });
            let _ = tx.send(SpeechEvent::Ended);
        });

        if let Some(previous) = self.task.replace(task) {
            previous.abort();
        }

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Scripted engine stopped");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
