//! Session-scoped wiring of the sync components.
//!
//! One orchestrator exists per authenticated session. It owns both channel
//! sessions and every timer; nothing here outlives
//! [`shutdown`](SyncOrchestrator::shutdown), so login/logout and restaurant
//! switches leak no sockets or intervals.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use savora_api::NotificationsGateway;
use savora_core::config::alerts::AlertsConfig;
use savora_core::config::api::ApiConfig;
use savora_core::config::realtime::RealtimeConfig;
use savora_core::events;
use savora_core::traits::Notifier;
use savora_entity::AuthSession;

use crate::alert::sink::AlertSink;
use crate::alert::{composer, filter};
use crate::channel::params::ConnectParams;
use crate::channel::session::ChannelSession;
use crate::channel::types::{ChannelKind, ChannelState, PushMessage};
use crate::store::NotificationStore;
use crate::visibility::Visibility;

/// Shared context for the message handlers and timers.
struct SyncCore {
    /// The authenticated session this orchestrator serves.
    session: AuthSession,
    /// Client-side list/count state.
    store: Arc<NotificationStore>,
    /// Native alert delivery.
    sink: Arc<AlertSink>,
    /// REST gateway for count polls.
    gateway: Arc<dyn NotificationsGateway>,
    /// Window visibility reported by the embedding shell.
    visibility: watch::Sender<Visibility>,
}

impl SyncCore {
    fn visibility_now(&self) -> Visibility {
        *self.visibility.borrow()
    }

    /// Handle one count-channel message.
    async fn handle_count_message(&self, message: PushMessage) {
        if message.event != events::NOTIFICATIONS_UNREAD && message.event != events::COUNT_UPDATE {
            trace!(event = %message.event, "ignoring non-count message on count channel");
            return;
        }

        match message.unread_count() {
            Some(count) => {
                debug!(count, "unread count pushed");
                self.store.set_unread_count(count).await;
                self.sink.observe_count(count, self.visibility_now()).await;
            }
            None => debug!("count message without a parseable count dropped"),
        }
    }

    /// Handle one event-channel message.
    async fn handle_domain_event(&self, message: PushMessage) {
        if events::is_control(&message.event) {
            trace!(event = %message.event, "control event ignored");
            return;
        }

        if !filter::should_alert(&message.event, &self.session.roles) {
            debug!(event = %message.event, "event suppressed for this role set");
            return;
        }

        match composer::compose(&message.event, &message.payload) {
            Some(content) => self.sink.publish_event(&message.event, content).await,
            None => trace!(event = %message.event, "no alert mapping for event"),
        }
    }

    /// Fetch the authoritative unread count and propagate it.
    async fn refresh_unread(&self) {
        match self.gateway.unread_count().await {
            Ok(count) => {
                self.store.set_unread_count(count).await;
                self.sink.observe_count(count, self.visibility_now()).await;
            }
            Err(e) => warn!(error = %e, "unread count fetch failed"),
        }
    }
}

/// Binds channel sessions, the store, and the alert sink to one
/// authenticated session's lifecycle.
pub struct SyncOrchestrator {
    /// Handler context shared with the orchestrator's tasks.
    core: Arc<SyncCore>,
    /// Channel timing policy.
    realtime: RealtimeConfig,
    /// Alert delivery policy.
    alerts: AlertsConfig,
    /// Unread-count push channel.
    count_channel: ChannelSession,
    /// Domain-event push channel.
    event_channel: ChannelSession,
    /// Inbound count messages, consumed once at start.
    count_rx: Mutex<Option<mpsc::Receiver<PushMessage>>>,
    /// Inbound event messages, consumed once at start.
    event_rx: Mutex<Option<mpsc::Receiver<PushMessage>>>,
    /// Stops every orchestrator-owned task.
    cancel: CancellationToken,
    /// Owned task handles, joined on shutdown.
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("restaurant", &self.core.session.restaurant_id)
            .finish()
    }
}

impl SyncOrchestrator {
    /// Wire up the components for one authenticated session.
    pub fn new(
        api: &ApiConfig,
        realtime: RealtimeConfig,
        alerts: AlertsConfig,
        session: AuthSession,
        gateway: Arc<dyn NotificationsGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let params = ConnectParams::for_session(api, &session);
        let (count_channel, count_rx) = ChannelSession::new(
            ChannelKind::Count,
            params.url(ChannelKind::Count),
            realtime.clone(),
        );
        let (event_channel, event_rx) = ChannelSession::new(
            ChannelKind::Events,
            params.url(ChannelKind::Events),
            realtime.clone(),
        );

        let store = Arc::new(NotificationStore::new(gateway.clone(), api.page_size));
        let sink = Arc::new(AlertSink::new(notifier, alerts.clone()));
        let (visibility, _) = watch::channel(Visibility::Visible);

        Self {
            core: Arc::new(SyncCore {
                session,
                store,
                sink,
                gateway,
                visibility,
            }),
            realtime,
            alerts,
            count_channel,
            event_channel,
            count_rx: Mutex::new(Some(count_rx)),
            event_rx: Mutex::new(Some(event_rx)),
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Start syncing.
    ///
    /// Opens both channels with a small stagger, seeds the unread count,
    /// and starts the background count poll plus the one-shot permission
    /// grace request.
    pub async fn start(&self) {
        info!(restaurant = %self.core.session.restaurant_id, "starting notification sync");

        // Consumers first, so nothing pushed during connection setup is lost.
        self.spawn_consumer(ChannelKind::Count);
        self.spawn_consumer(ChannelKind::Events);

        self.count_channel.connect();

        // Seed the authoritative count while the stagger elapses.
        self.core.refresh_unread().await;

        let event_channel = self.event_channel.clone();
        let cancel = self.cancel.clone();
        let stagger = self.realtime.connect_stagger();
        self.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(stagger) => {}
            }
            event_channel.connect();
        });

        let core = Arc::clone(&self.core);
        let cancel = self.cancel.clone();
        let poll_interval = self.realtime.unread_poll_interval();
        self.spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // the initial fetch already happened
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        core.refresh_unread().await;
                        core.sink.maintain();
                    }
                }
            }
        });

        let core = Arc::clone(&self.core);
        let cancel = self.cancel.clone();
        let grace = self.alerts.permission_grace();
        self.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(grace) => {}
            }
            core.sink.ensure_permission().await;
        });
    }

    /// Report a window visibility transition.
    ///
    /// Regaining visibility re-fetches the unread count and reconnects any
    /// channel that is not currently open.
    pub async fn set_visibility(&self, visibility: Visibility) {
        let previous = *self.core.visibility.borrow();
        if previous == visibility {
            return;
        }
        self.core.visibility.send_replace(visibility);

        if visibility == Visibility::Visible {
            debug!("window visible again; refreshing count and channels");
            self.core.refresh_unread().await;
            if self.count_channel.state() != ChannelState::Open {
                self.count_channel.connect();
            }
            if self.event_channel.state() != ChannelState::Open {
                self.event_channel.connect();
            }
        }
    }

    /// Tear everything down: both channel sessions, the poll, and every
    /// pending timer. Safe to call more than once.
    pub async fn shutdown(&self) {
        info!(restaurant = %self.core.session.restaurant_id, "shutting down notification sync");

        self.cancel.cancel();
        self.count_channel.teardown();
        self.event_channel.teardown();

        self.count_channel.join().await;
        self.event_channel.join().await;

        let handles = {
            let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *tasks)
        };
        for handle in handles {
            let _ = handle.await;
        }

        info!("notification sync shut down");
    }

    /// Handle one count-channel message.
    pub async fn handle_count_message(&self, message: PushMessage) {
        self.core.handle_count_message(message).await;
    }

    /// Handle one event-channel message.
    pub async fn handle_domain_event(&self, message: PushMessage) {
        self.core.handle_domain_event(message).await;
    }

    /// Fetch the authoritative unread count and propagate it.
    pub async fn refresh_unread(&self) {
        self.core.refresh_unread().await;
    }

    /// The store backing the notification list UI.
    pub fn store(&self) -> Arc<NotificationStore> {
        self.core.store.clone()
    }

    /// The unread-count channel session.
    pub fn count_channel(&self) -> &ChannelSession {
        &self.count_channel
    }

    /// The domain-event channel session.
    pub fn event_channel(&self) -> &ChannelSession {
        &self.event_channel
    }

    fn spawn(&self, future: impl Future<Output = ()> + Send + 'static) {
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.push(handle);
    }

    fn spawn_consumer(&self, kind: ChannelKind) {
        let receiver = {
            let slot = match kind {
                ChannelKind::Count => &self.count_rx,
                ChannelKind::Events => &self.event_rx,
            };
            let mut slot = slot.lock().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };

        let Some(mut receiver) = receiver else {
            debug!(channel = %kind, "consumer already running");
            return;
        };

        let core = Arc::clone(&self.core);
        let cancel = self.cancel.clone();
        self.spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    message = receiver.recv() => match message {
                        Some(message) => match kind {
                            ChannelKind::Count => core.handle_count_message(message).await,
                            ChannelKind::Events => core.handle_domain_event(message).await,
                        },
                        None => break,
                    }
                }
            }
        });
    }
}
