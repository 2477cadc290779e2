//! Reconnecting, heartbeated push channel session.
//!
//! One session owns one logical channel. A single run loop drives the
//! `disconnected → connecting → open → disconnected` state machine, so two
//! sockets can never be open for the same channel at once. The reconnect
//! delay is constant; sustained outages retry at a fixed cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use savora_core::config::realtime::RealtimeConfig;

use super::types::{ChannelKind, ChannelState, PushMessage};

/// Keep-alive frame sent on the heartbeat interval. Best-effort; the
/// server's reply is not tracked.
const KEEPALIVE_FRAME: &str = r#"{"event":"ping"}"#;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A resilient connection to one push endpoint.
///
/// Created per authenticated scope by the orchestrator and destroyed on
/// session end; [`teardown`](Self::teardown) stops the socket, the
/// heartbeat, and any pending reconnect on every exit path.
#[derive(Clone)]
pub struct ChannelSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    /// Which logical channel this session serves.
    kind: ChannelKind,
    /// Full connection URL including identity query parameters.
    url: String,
    /// Timing policy shared by both channels.
    config: RealtimeConfig,
    /// Observable connection state.
    state_tx: watch::Sender<ChannelState>,
    /// Inbound message stream handed to the owner at construction.
    messages_tx: mpsc::Sender<PushMessage>,
    /// Teardown signal; once cancelled the session never reconnects.
    cancel: CancellationToken,
    /// Nudges the run loop out of the reconnect delay.
    retry: Notify,
    /// Whether the run loop has been spawned.
    running: AtomicBool,
    /// Run loop handle, taken by [`ChannelSession::join`].
    task: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for ChannelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSession")
            .field("kind", &self.inner.kind)
            .field("state", &self.state())
            .finish()
    }
}

impl ChannelSession {
    /// Create a session and the receiver for its inbound messages.
    pub fn new(
        kind: ChannelKind,
        url: String,
        config: RealtimeConfig,
    ) -> (Self, mpsc::Receiver<PushMessage>) {
        let (messages_tx, messages_rx) = mpsc::channel(config.channel_buffer_size);
        let (state_tx, _) = watch::channel(ChannelState::Disconnected);

        let session = Self {
            inner: Arc::new(SessionInner {
                kind,
                url,
                config,
                state_tx,
                messages_tx,
                cancel: CancellationToken::new(),
                retry: Notify::new(),
                running: AtomicBool::new(false),
                task: Mutex::new(None),
            }),
        };

        (session, messages_rx)
    }

    /// Which logical channel this session serves.
    pub fn kind(&self) -> ChannelKind {
        self.inner.kind
    }

    /// Open the channel.
    ///
    /// A no-op while the session is `connecting` or `open`. If the run loop
    /// is sleeping out a reconnect delay, the delay is cut short instead of
    /// opening a second socket. Ignored entirely after
    /// [`teardown`](Self::teardown).
    pub fn connect(&self) {
        let inner = &self.inner;

        if inner.cancel.is_cancelled() {
            warn!(channel = %inner.kind, "connect ignored after teardown");
            return;
        }

        if inner.running.swap(true, Ordering::SeqCst) {
            if self.state() == ChannelState::Disconnected {
                trace!(channel = %inner.kind, "nudging pending reconnect");
                inner.retry.notify_one();
            } else {
                trace!(channel = %inner.kind, "connect is a no-op while connecting/open");
            }
            return;
        }

        let session = Arc::clone(inner);
        let handle = tokio::spawn(async move { session.run().await });

        let mut task = inner.task.lock().unwrap_or_else(|e| e.into_inner());
        *task = Some(handle);
    }

    /// Current connection state.
    pub fn state(&self) -> ChannelState {
        *self.inner.state_tx.borrow()
    }

    /// Subscribe to connection state transitions.
    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.inner.state_tx.subscribe()
    }

    /// Tear the session down.
    ///
    /// Synchronously cancels the heartbeat, any pending reconnect, and all
    /// future scheduling; the socket closes as the run loop unwinds. Socket
    /// events arriving after teardown are no-ops.
    pub fn teardown(&self) {
        debug!(channel = %self.inner.kind, "tearing down channel session");
        self.inner.cancel.cancel();
    }

    /// Wait for the run loop to exit after [`teardown`](Self::teardown).
    pub async fn join(&self) {
        let handle = {
            let mut task = self.inner.task.lock().unwrap_or_else(|e| e.into_inner());
            task.take()
        };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl SessionInner {
    fn set_state(&self, state: ChannelState) {
        self.state_tx.send_replace(state);
    }

    /// Connection/reconnection loop; the only place sockets are opened.
    async fn run(&self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            self.set_state(ChannelState::Connecting);
            debug!(channel = %self.kind, "connecting");

            let connected = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = connect_async(self.url.as_str()) => result,
            };

            match connected {
                Ok((socket, _)) => {
                    info!(channel = %self.kind, "channel open");
                    self.set_state(ChannelState::Open);
                    self.drive(socket).await;
                }
                Err(e) => {
                    warn!(channel = %self.kind, error = %e, "connection attempt failed");
                }
            }

            self.set_state(ChannelState::Disconnected);
            if self.cancel.is_cancelled() {
                break;
            }

            // Exactly one reconnect is pending at a time; a visibility
            // nudge cuts the constant delay short.
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.reconnect_delay()) => {}
                _ = self.retry.notified() => {
                    debug!(channel = %self.kind, "reconnecting early on demand");
                }
            }
        }

        self.set_state(ChannelState::Disconnected);
        debug!(channel = %self.kind, "session loop ended");
    }

    /// Pump one open socket until it closes, errors, or teardown.
    async fn drive(&self, mut socket: Socket) {
        let mut heartbeat = tokio::time::interval(self.config.heartbeat_interval());
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    let _ = socket.close(None).await;
                    return;
                }
                _ = heartbeat.tick() => {
                    if let Err(e) = socket.send(Message::text(KEEPALIVE_FRAME)).await {
                        warn!(channel = %self.kind, error = %e, "keep-alive send failed");
                        return;
                    }
                }
                frame = socket.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.handle_text(&text).await,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = socket.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!(channel = %self.kind, "channel closed by server");
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(channel = %self.kind, error = %e, "socket error");
                        return;
                    }
                }
            }
        }
    }

    async fn handle_text(&self, text: &str) {
        match serde_json::from_str::<PushMessage>(text) {
            Ok(message) => {
                trace!(channel = %self.kind, event = %message.event, "message received");
                if self.messages_tx.send(message).await.is_err() {
                    debug!(channel = %self.kind, "message receiver dropped");
                }
            }
            Err(e) => {
                debug!(channel = %self.kind, error = %e, "dropping malformed frame");
            }
        }
    }
}
