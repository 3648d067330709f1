use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::engine::{SpeechEngine, SpeechEvent};
use crate::retry::{RestartSchedule, RetryPolicy};

/// Transcript updates the channel reports to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechUpdate {
    /// Live preview text; never persisted.
    Interim(String),
    /// A committed transcript.
    Final(String),
    /// The engine reported an error (recovery, if any, is already
    /// scheduled).
    EngineError(String),
}

struct Inner {
    engine: tokio::sync::Mutex<Box<dyn SpeechEngine>>,
    active: AtomicBool,
    restart: RestartSchedule,
    updates: mpsc::UnboundedSender<SpeechUpdate>,
    end_restart: RetryPolicy,
    error_restart: RetryPolicy,
}

/// Wraps a recognition engine with the auto-restart policy.
///
/// Engines end runs spontaneously; while the channel is active an ended
/// run is restarted after a short delay, and a non-benign error restarts
/// after a longer one (cancelling any restart already pending, so two
/// engines never run at once). Deactivation cancels pending restarts and
/// suppresses the end-of-run restart path.
pub struct SpeechChannel {
    inner: Arc<Inner>,
}

impl SpeechChannel {
    pub fn new(
        engine: Box<dyn SpeechEngine>,
        end_restart: RetryPolicy,
        error_restart: RetryPolicy,
        updates: mpsc::UnboundedSender<SpeechUpdate>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine: tokio::sync::Mutex::new(engine),
                active: AtomicBool::new(false),
                restart: RestartSchedule::new(),
                updates,
                end_restart,
                error_restart,
            }),
        }
    }

    /// Activate the channel and begin the first recognition run.
    pub async fn start(&self) -> Result<()> {
        self.inner.active.store(true, Ordering::SeqCst);
        Inner::begin_run(Arc::clone(&self.inner)).await?;
        info!("Speech channel active");
        Ok(())
    }

    /// Deactivate: cancel pending restarts, stop the engine, and suppress
    /// the end-of-run restart. Safe to call repeatedly.
    pub async fn deactivate(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        self.inner.restart.cancel();

        let mut engine = self.inner.engine.lock().await;
        if let Err(e) = engine.stop().await {
            warn!("Error stopping speech engine: {}", e);
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }
}

impl Inner {
    /// Start one engine run and spawn its event pump.
    ///
    /// Boxed because restarts re-enter this function from a scheduled task.
    fn begin_run(inner: Arc<Inner>) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            let events = {
                let mut engine = inner.engine.lock().await;
                engine.start().await?
            };
            tokio::spawn(Inner::run_loop(Arc::clone(&inner), events));
            Ok(())
        })
    }

    fn schedule_restart(inner: &Arc<Inner>, policy: RetryPolicy) {
        let restart_inner = Arc::clone(inner);
        inner.restart.schedule(policy, async move {
            if !restart_inner.active.load(Ordering::SeqCst) {
                return;
            }
            debug!("Restarting speech engine after {:?}", policy.delay);
            if let Err(e) = Inner::begin_run(Arc::clone(&restart_inner)).await {
                warn!("Failed to restart speech engine: {}", e);
            }
        });
    }

    /// Consume one run's events until the engine ends it.
    async fn run_loop(inner: Arc<Inner>, mut events: mpsc::UnboundedReceiver<SpeechEvent>) {
        // An error restart outlives the run; the end-of-run path must not
        // replace it with the shorter delay.
        let mut error_restart_pending = false;

        while let Some(event) = events.recv().await {
            match event {
                SpeechEvent::Transcript { text, is_final } => {
                    let update = if is_final {
                        SpeechUpdate::Final(text)
                    } else {
                        SpeechUpdate::Interim(text)
                    };
                    let _ = inner.updates.send(update);
                }
                SpeechEvent::Error(err) => {
                    warn!("Speech recognition error: {}", err);
                    let _ = inner.updates.send(SpeechUpdate::EngineError(err.to_string()));

                    if inner.active.load(Ordering::SeqCst) && !err.is_benign() {
                        Inner::schedule_restart(&inner, inner.error_restart);
                        error_restart_pending = true;
                    }
                }
                SpeechEvent::Ended => break,
            }
        }

        // Run over (explicit end or the engine dropped its sender).
        if inner.active.load(Ordering::SeqCst) && !error_restart_pending {
            Inner::schedule_restart(&inner, inner.end_restart);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::engine::SpeechError;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Engine whose runs are driven by the test through a side channel.
    struct PushEngine {
        starts: Arc<AtomicUsize>,
        script: Arc<std::sync::Mutex<Vec<Vec<SpeechEvent>>>>,
    }

    #[async_trait::async_trait]
    impl SpeechEngine for PushEngine {
        async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<SpeechEvent>> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            let (tx, rx) = mpsc::unbounded_channel();
            let events = {
                let mut script = self.script.lock().unwrap();
                if script.is_empty() {
                    Vec::new()
                } else {
                    script.remove(0)
                }
            };
            tokio::spawn(async move {
                for event in events {
                    tx.send(event).ok();
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
                // Keep the run open; the channel decides when it ends.
                std::future::pending::<()>().await;
            });
            Ok(rx)
        }

        async fn stop(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "push"
        }
    }

    fn channel_with_script(
        script: Vec<Vec<SpeechEvent>>,
    ) -> (SpeechChannel, mpsc::UnboundedReceiver<SpeechUpdate>, Arc<AtomicUsize>) {
        let starts = Arc::new(AtomicUsize::new(0));
        let engine = PushEngine {
            starts: Arc::clone(&starts),
            script: Arc::new(std::sync::Mutex::new(script)),
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = SpeechChannel::new(
            Box::new(engine),
            RetryPolicy::new(Duration::from_millis(20)),
            RetryPolicy::new(Duration::from_millis(40)),
            tx,
        );
        (channel, rx, starts)
    }

    #[tokio::test]
    async fn final_and_interim_transcripts_are_forwarded() {
        let (channel, mut rx, _) = channel_with_script(vec![vec![
            SpeechEvent::Transcript {
                text: "turn".into(),
                is_final: false,
            },
            SpeechEvent::Transcript {
                text: "turn left".into(),
                is_final: true,
            },
        ]]);

        channel.start().await.unwrap();

        assert_eq!(rx.recv().await, Some(SpeechUpdate::Interim("turn".into())));
        assert_eq!(rx.recv().await, Some(SpeechUpdate::Final("turn left".into())));

        channel.deactivate().await;
    }

    #[tokio::test]
    async fn ended_run_restarts_while_active() {
        let (channel, _rx, starts) =
            channel_with_script(vec![vec![SpeechEvent::Ended], vec![]]);

        channel.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(starts.load(Ordering::SeqCst) >= 2, "engine should restart after end");
        channel.deactivate().await;
    }

    #[tokio::test]
    async fn benign_error_does_not_restart() {
        let (channel, mut rx, starts) = channel_with_script(vec![vec![SpeechEvent::Error(
            SpeechError::NoSpeech,
        )]]);

        channel.start().await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(SpeechUpdate::EngineError("no-speech".into()))
        );
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(starts.load(Ordering::SeqCst), 1);
        channel.deactivate().await;
    }

    #[tokio::test]
    async fn engine_error_restarts_after_longer_delay() {
        let (channel, mut rx, starts) = channel_with_script(vec![
            vec![SpeechEvent::Error(SpeechError::Engine("network".into())), SpeechEvent::Ended],
            vec![],
        ]);

        channel.start().await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(SpeechUpdate::EngineError("network".into()))
        );
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(starts.load(Ordering::SeqCst), 2, "exactly one restart may fire");
        channel.deactivate().await;
    }

    #[tokio::test]
    async fn deactivate_cancels_pending_restart() {
        let (channel, _rx, starts) =
            channel_with_script(vec![vec![SpeechEvent::Ended], vec![]]);

        channel.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        channel.deactivate().await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(starts.load(Ordering::SeqCst), 1, "no restart after deactivation");
        assert!(!channel.is_active());
    }
}
