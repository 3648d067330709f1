//! Fixed-delay retry primitives
//!
//! The assistant's recovery paths (speech-engine restarts, transport
//! reconnects) all use fixed delays, never backoff: each failure repeats
//! the same wait.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A fixed delay applied before each retry attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// At most one pending restart at a time.
///
/// Scheduling cancels any restart already pending, so two recovery paths
/// can never leave duplicate restarts queued. Cancelling when nothing is
/// pending is a no-op.
#[derive(Debug, Default)]
pub struct RestartSchedule {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RestartSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `restart` after `policy.delay`, replacing any pending restart.
    pub fn schedule<F>(&self, policy: RetryPolicy, restart: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            policy.wait().await;
            restart.await;
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop any pending restart without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }

    pub fn has_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}
