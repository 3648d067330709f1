use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use super::messages::{InboundMessage, OutboundFrame};
use crate::retry::RetryPolicy;

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Connecting,
    Open,
    Closed,
}

/// Events the transport reports to the session.
#[derive(Debug)]
pub enum TransportEvent {
    /// The connection was established (or re-established).
    Opened,
    /// A decoded message arrived from the service.
    Inbound(InboundMessage),
    /// The connection dropped while the session was running; a reconnect
    /// is scheduled.
    Lost,
}

/// A single persistent WebSocket connection to the assistant service.
///
/// The connection is owned by a background task. While the session runs,
/// an unexpected drop triggers one reconnect attempt after a fixed delay;
/// each further drop repeats the same delay. After explicit [`close`]
/// (or once the session stops) no reconnect occurs.
///
/// [`close`]: Transport::close
pub struct Transport {
    state: Arc<Mutex<ConnState>>,
    outbound_tx: mpsc::UnboundedSender<OutboundFrame>,
    shutdown: Arc<Notify>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Transport {
    /// Open a connection to `endpoint` and spawn the connection task.
    ///
    /// `is_running` is the session's run flag; reconnects happen only while
    /// it is true. Transport events flow to the session through `events`.
    pub fn open(
        endpoint: String,
        reconnect: RetryPolicy,
        is_running: Arc<AtomicBool>,
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Arc<Self> {
        let state = Arc::new(Mutex::new(ConnState::Connecting));
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(connection_loop(
            endpoint,
            Arc::clone(&state),
            reconnect,
            is_running,
            events,
            outbound_rx,
            Arc::clone(&shutdown),
        ));

        Arc::new(Self {
            state,
            outbound_tx,
            shutdown,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn state(&self) -> ConnState {
        *self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn is_open(&self) -> bool {
        self.state() == ConnState::Open
    }

    /// Queue a frame for sending.
    ///
    /// Silently dropped unless the connection is Open — callers must not
    /// assume delivery. Returns whether the frame was queued.
    pub fn send(&self, frame: OutboundFrame) -> bool {
        if !self.is_open() {
            debug!("Transport not open, dropping outbound frame");
            return false;
        }
        // A send error means the connection task is gone; the frame is
        // dropped either way.
        self.outbound_tx.send(frame).is_ok()
    }

    /// Close the connection and stop the connection task.
    ///
    /// Safe to call more than once; closing an already-closed transport is
    /// a no-op.
    pub async fn close(&self) {
        let handle = {
            let mut task = self.task.lock().unwrap_or_else(|p| p.into_inner());
            task.take()
        };

        if let Some(handle) = handle {
            self.shutdown.notify_one();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Transport task panicked: {}", e);
                }
            }
        }

        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        *state = ConnState::Closed;
    }
}

fn set_state(state: &Arc<Mutex<ConnState>>, next: ConnState) {
    let mut guard = state.lock().unwrap_or_else(|p| p.into_inner());
    *guard = next;
}

/// Dial, serve, and redial with a fixed delay until shutdown or the
/// session stops running.
async fn connection_loop(
    endpoint: String,
    state: Arc<Mutex<ConnState>>,
    reconnect: RetryPolicy,
    is_running: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<TransportEvent>,
    mut outbound_rx: mpsc::UnboundedReceiver<OutboundFrame>,
    shutdown: Arc<Notify>,
) {
    loop {
        set_state(&state, ConnState::Connecting);

        match run_connection(&endpoint, &state, &events, &mut outbound_rx, &shutdown).await {
            Ok(()) => {
                // Explicit shutdown: clean close, no reconnect.
                set_state(&state, ConnState::Closed);
                break;
            }
            Err(e) => {
                warn!("WebSocket connection to {} lost: {}", endpoint, e);
                set_state(&state, ConnState::Closed);

                if !is_running.load(Ordering::SeqCst) {
                    break;
                }

                let _ = events.send(TransportEvent::Lost);

                tokio::select! {
                    _ = reconnect.wait() => continue,
                    _ = shutdown.notified() => break,
                }
            }
        }
    }
}

/// Serve one connection until it drops or shutdown is requested.
///
/// Returns `Ok(())` only for an explicit shutdown; every other exit is an
/// unexpected close.
async fn run_connection(
    endpoint: &str,
    state: &Arc<Mutex<ConnState>>,
    events: &mpsc::UnboundedSender<TransportEvent>,
    outbound_rx: &mut mpsc::UnboundedReceiver<OutboundFrame>,
    shutdown: &Arc<Notify>,
) -> Result<(), String> {
    let connect = tokio::select! {
        result = connect_async(endpoint) => result.map_err(|e| format!("connect: {}", e))?,
        _ = shutdown.notified() => return Ok(()),
    };
    let (ws_stream, _) = connect;

    info!("WebSocket connected to {}", endpoint);
    set_state(state, ConnState::Open);
    let _ = events.send(TransportEvent::Opened);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match InboundMessage::decode(&text) {
                            Ok(message) => {
                                let _ = events.send(TransportEvent::Inbound(message));
                            }
                            Err(e) => {
                                // Malformed payloads never close the connection.
                                warn!("Discarding malformed inbound message: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return Err("connection closed by server".into());
                    }
                    Some(Err(e)) => {
                        return Err(format!("read error: {}", e));
                    }
                    // Ping/Pong handled by tungstenite, binary frames ignored.
                    Some(Ok(_)) => {}
                }
            }
            Some(frame) = outbound_rx.recv() => {
                let json = match serde_json::to_string(&frame) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize outbound frame: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json)).await {
                    return Err(format!("send error: {}", e));
                }
            }
            _ = shutdown.notified() => {
                let _ = write.send(Message::Close(None)).await;
                return Ok(());
            }
        }
    }
}
