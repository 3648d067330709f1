use super::config::SessionConfig;
use super::stats::SessionStats;
use crate::capture::{CameraBackend, FrameSampler};
use crate::retry::RetryPolicy;
use crate::speech::{SpeechChannel, SpeechEngine, SpeechUpdate};
use crate::transport::{ConnState, InboundMessage, OutboundFrame, Transport, TransportEvent};
use crate::ui::{Role, Status, View};
use anyhow::Result;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Everything the session's event pump can receive, from any component.
///
/// No ordering holds across the two sources; events are applied in arrival
/// order.
enum SessionEvent {
    Transport(TransportEvent),
    Speech(SpeechUpdate),
}

/// An assistant session: owns the camera, speech channel and connection,
/// and routes every inbound message to its presentation effect.
pub struct AssistantSession {
    config: SessionConfig,

    /// Whether the session is currently running
    is_running: Arc<AtomicBool>,

    /// When the current session started
    started_at: std::sync::Mutex<chrono::DateTime<chrono::Utc>>,

    /// Presentation state, shared with the event pump
    view: Arc<Mutex<View>>,

    /// Camera backend (best-effort; the session runs video-less if it fails)
    camera: Mutex<Box<dyn CameraBackend>>,

    /// Speech channel wrapping the recognition engine
    speech: SpeechChannel,

    /// The session's single connection; exclusively owned here
    transport: Arc<std::sync::Mutex<Option<Arc<Transport>>>>,

    /// The session's single capture timer; exclusively owned here
    sampler: FrameSampler,

    /// Fan-in sender for the event pump
    event_tx: mpsc::UnboundedSender<SessionEvent>,

    /// Handle for the event pump task
    pump_task: std::sync::Mutex<Option<JoinHandle<()>>>,

    frames_sent: Arc<AtomicUsize>,
    transcripts_sent: Arc<AtomicUsize>,
    messages_received: Arc<AtomicUsize>,
}

impl AssistantSession {
    /// Create a session around the given device seams.
    pub fn new(
        config: SessionConfig,
        camera: Box<dyn CameraBackend>,
        engine: Box<dyn SpeechEngine>,
    ) -> Self {
        info!("Creating assistant session: {}", config.client_id);

        let view = Arc::new(Mutex::new(View::default()));
        let transport: Arc<std::sync::Mutex<Option<Arc<Transport>>>> =
            Arc::new(std::sync::Mutex::new(None));

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        // Speech updates fan into the same pump as transport events.
        let (speech_tx, mut speech_rx) = mpsc::unbounded_channel();
        let speech_event_tx = event_tx.clone();
        tokio::spawn(async move {
            while let Some(update) = speech_rx.recv().await {
                if speech_event_tx.send(SessionEvent::Speech(update)).is_err() {
                    break;
                }
            }
        });

        let speech = SpeechChannel::new(
            engine,
            RetryPolicy::new(config.restart_after_end),
            RetryPolicy::new(config.restart_after_error),
            speech_tx,
        );

        let transcripts_sent = Arc::new(AtomicUsize::new(0));
        let messages_received = Arc::new(AtomicUsize::new(0));

        let pump_task = tokio::spawn(event_pump(
            event_rx,
            Arc::clone(&view),
            Arc::clone(&transport),
            Arc::clone(&transcripts_sent),
            Arc::clone(&messages_received),
        ));

        Self {
            config,
            is_running: Arc::new(AtomicBool::new(false)),
            started_at: std::sync::Mutex::new(Utc::now()),
            view,
            camera: Mutex::new(camera),
            speech,
            transport,
            sampler: FrameSampler::new(),
            event_tx,
            pump_task: std::sync::Mutex::new(Some(pump_task)),
            frames_sent: Arc::new(AtomicUsize::new(0)),
            transcripts_sent,
            messages_received,
        }
    }

    /// Start the assistant.
    ///
    /// Calling start on a running session is treated as a reset: the stale
    /// connection is closed and every component is restarted, so the
    /// one-connection and one-timer invariants hold regardless.
    pub async fn start(&self) -> Result<()> {
        info!("Starting assistant session: {}", self.config.client_id);

        {
            let mut view = self.view.lock().await;
            view.status.set(Status::Starting, "Starting assistant...");
        }

        self.is_running.store(true, Ordering::SeqCst);
        {
            let mut started = self
                .started_at
                .lock()
                .unwrap_or_else(|p| p.into_inner());
            *started = Utc::now();
        }

        // Clear state left over from the previous session.
        {
            let mut view = self.view.lock().await;
            view.clear_session_state();
        }

        // Camera is best-effort: on failure the session continues without
        // video.
        let frames = {
            let mut camera = self.camera.lock().await;
            if camera.is_capturing() {
                if let Err(e) = camera.stop().await {
                    warn!("Error resetting camera: {}", e);
                }
            }
            match camera.start().await {
                Ok(rx) => Some(rx),
                Err(e) => {
                    error!("Camera error: {}", e);
                    let mut view = self.view.lock().await;
                    view.status.set(Status::Error, format!("Camera error: {}", e));
                    None
                }
            }
        };

        // Close a stale connection before opening a fresh one, and cancel
        // any capture timer still ticking against it. The timer is only
        // re-armed below when this run's camera came up.
        self.sampler.stop();
        let stale = {
            let mut slot = self.transport.lock().unwrap_or_else(|p| p.into_inner());
            slot.take()
        };
        if let Some(stale) = stale {
            debug!("Closing stale connection before reconnecting");
            stale.close().await;
        }

        let (transport_tx, mut transport_rx) = mpsc::unbounded_channel();
        let transport_event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = transport_rx.recv().await {
                if transport_event_tx
                    .send(SessionEvent::Transport(event))
                    .is_err()
                {
                    break;
                }
            }
        });

        let transport = Transport::open(
            self.config.endpoint(),
            RetryPolicy::new(self.config.reconnect_delay),
            Arc::clone(&self.is_running),
            transport_tx,
        );
        {
            let mut slot = self.transport.lock().unwrap_or_else(|p| p.into_inner());
            *slot = Some(Arc::clone(&transport));
        }

        // Speech failures are reported but do not abort startup.
        if self.speech.is_active() {
            self.speech.deactivate().await;
        }
        if let Err(e) = self.speech.start().await {
            error!("Speech recognition error: {}", e);
            let mut view = self.view.lock().await;
            view.status.set(Status::Error, format!("Speech error: {}", e));
        }

        // Frame sampling only runs when the camera came up.
        if let Some(frames) = frames {
            self.sampler.start(
                self.config.capture_period,
                self.config.jpeg_quality,
                frames,
                transport,
                Arc::clone(&self.is_running),
                Arc::clone(&self.frames_sent),
            );
        }

        {
            let mut view = self.view.lock().await;
            view.status.set(Status::Active, "Assistant active");
            view.conversation
                .append(Role::System, "Assistant is now active. Please speak clearly.");
        }

        info!("Assistant session started");
        Ok(())
    }

    /// Stop the assistant. Safe to call any number of times.
    pub async fn stop(&self) {
        if !self.is_running.swap(false, Ordering::SeqCst) {
            debug!("Session already stopped");
            return;
        }

        info!("Stopping assistant session: {}", self.config.client_id);

        {
            let mut view = self.view.lock().await;
            view.status.set(Status::Stopping, "Stopping assistant...");
        }

        // Release the camera and cancel the capture timer.
        {
            let mut camera = self.camera.lock().await;
            if let Err(e) = camera.stop().await {
                warn!("Error stopping camera: {}", e);
            }
        }
        self.sampler.stop();

        // Deactivation suppresses the speech auto-restart paths.
        self.speech.deactivate().await;

        let transport = {
            let mut slot = self.transport.lock().unwrap_or_else(|p| p.into_inner());
            slot.take()
        };
        if let Some(transport) = transport {
            transport.close().await;
        }

        {
            let mut view = self.view.lock().await;
            view.status.set(Status::Ready, "Ready");
            view.conversation.append(Role::System, "Assistant stopped.");
        }

        info!("Assistant session stopped");
    }

    /// Route one inbound message to its presentation effect.
    pub async fn dispatch(&self, message: InboundMessage) {
        self.messages_received.fetch_add(1, Ordering::SeqCst);
        let mut view = self.view.lock().await;
        apply_inbound(&mut view, message);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Whether the frame capture timer is currently live. False whenever the
    /// camera is down, including after a restart where it failed to come up.
    pub fn capture_active(&self) -> bool {
        self.sampler.is_active()
    }

    /// Current connection state, if a connection exists.
    pub fn connection_state(&self) -> Option<ConnState> {
        let slot = self.transport.lock().unwrap_or_else(|p| p.into_inner());
        slot.as_ref().map(|t| t.state())
    }

    /// Shared handle to the presentation state.
    pub fn view(&self) -> Arc<Mutex<View>> {
        Arc::clone(&self.view)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        let started_at = *self
            .started_at
            .lock()
            .unwrap_or_else(|p| p.into_inner());
        let duration = Utc::now().signed_duration_since(started_at);

        SessionStats {
            is_running: self.is_running.load(Ordering::SeqCst),
            started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            frames_sent: self.frames_sent.load(Ordering::SeqCst),
            transcripts_sent: self.transcripts_sent.load(Ordering::SeqCst),
            messages_received: self.messages_received.load(Ordering::SeqCst),
        }
    }
}

impl Drop for AssistantSession {
    fn drop(&mut self) {
        let mut pump = self.pump_task.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(task) = pump.take() {
            task.abort();
        }
    }
}

/// Apply transport and speech events to the view, in arrival order.
async fn event_pump(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    view: Arc<Mutex<View>>,
    transport: Arc<std::sync::Mutex<Option<Arc<Transport>>>>,
    transcripts_sent: Arc<AtomicUsize>,
    messages_received: Arc<AtomicUsize>,
) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Transport(TransportEvent::Opened) => {
                let mut view = view.lock().await;
                view.status.set(Status::Active, "Connected");
            }
            SessionEvent::Transport(TransportEvent::Lost) => {
                let mut view = view.lock().await;
                view.status.set(Status::Error, "Connection lost");
            }
            SessionEvent::Transport(TransportEvent::Inbound(message)) => {
                messages_received.fetch_add(1, Ordering::SeqCst);
                let mut view = view.lock().await;
                apply_inbound(&mut view, message);
            }
            SessionEvent::Speech(SpeechUpdate::Interim(text)) => {
                let mut view = view.lock().await;
                view.voice.set_interim(text);
            }
            SessionEvent::Speech(SpeechUpdate::Final(text)) => {
                {
                    let mut view = view.lock().await;
                    view.voice.commit(text.clone());
                    view.conversation.append(Role::User, text.clone());
                    view.status.set(Status::Processing, "Processing...");
                }

                // Dropped silently if the connection is not open.
                let current = {
                    let slot = transport.lock().unwrap_or_else(|p| p.into_inner());
                    slot.clone()
                };
                if let Some(transport) = current {
                    if transport.send(OutboundFrame::Text { text }) {
                        transcripts_sent.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
            SessionEvent::Speech(SpeechUpdate::EngineError(message)) => {
                let mut view = view.lock().await;
                view.status
                    .set(Status::Error, format!("Speech error: {}", message));
            }
        }
    }
}

/// The inbound dispatch table.
fn apply_inbound(view: &mut View, message: InboundMessage) {
    match message {
        InboundMessage::Emotion { emotion } => {
            view.emotion.set(emotion);
        }
        InboundMessage::AiResponse { response } => {
            let text = if response.result.is_empty() {
                "No response".to_string()
            } else {
                response.result
            };
            view.response_text = text.clone();
            view.conversation.append(Role::Assistant, text);
            view.gallery.replace(response.images);
            view.status.set(Status::Active, "Connected");
        }
        InboundMessage::Audio { url } => {
            view.audio.load(url);
            view.status.set(Status::Speaking, "Speaking...");
        }
        InboundMessage::FinalResponse => {
            // Feature disabled server-side; acknowledge and move on.
            debug!("Ignoring final_response message");
            view.status.set(Status::Ready, "Ready");
        }
        InboundMessage::StopAcknowledged => {
            view.status.set(Status::Ready, "Ready");
        }
        InboundMessage::Error { message } => {
            error!("Server error: {}", message);
            view.status.set(Status::Error, format!("Error: {}", message));
        }
        InboundMessage::Unknown => {
            debug!("Ignoring message with unknown type");
        }
    }
}
