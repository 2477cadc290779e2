//! Shared helpers for the realtime integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use savora_api::{NotificationPage, NotificationsGateway};
use savora_core::traits::{NativeAlert, Notifier, PermissionState};
use savora_core::types::{RestaurantId, StaffId};
use savora_core::{AppError, AppResult};
use savora_entity::{AuthSession, StaffRole};

/// What the test push server does with each accepted connection.
pub enum ServerBehavior {
    /// Complete the handshake, then close immediately.
    CloseImmediately,
    /// Send the given text frames, then hold the connection open.
    SendFrames(Vec<String>),
    /// Hold the connection open until the client closes.
    Hold,
}

/// In-process WebSocket server standing in for a push endpoint.
pub struct PushServer {
    addr: SocketAddr,
    /// Total connections accepted.
    pub accepted: Arc<AtomicUsize>,
    /// High-water mark of simultaneously open connections.
    pub max_concurrent: Arc<AtomicUsize>,
}

impl PushServer {
    /// Bind on an ephemeral port and start accepting.
    pub async fn spawn(behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let accepted = Arc::new(AtomicUsize::new(0));
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_concurrent = Arc::new(AtomicUsize::new(0));
        let behavior = Arc::new(behavior);

        let accepted_counter = accepted.clone();
        let concurrent_counter = concurrent.clone();
        let max_counter = max_concurrent.clone();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                accepted_counter.fetch_add(1, Ordering::SeqCst);
                let current = concurrent_counter.fetch_add(1, Ordering::SeqCst) + 1;
                max_counter.fetch_max(current, Ordering::SeqCst);

                let concurrent = concurrent_counter.clone();
                let behavior = behavior.clone();
                tokio::spawn(async move {
                    if let Ok(mut socket) = tokio_tungstenite::accept_async(stream).await {
                        match &*behavior {
                            ServerBehavior::CloseImmediately => {
                                let _ = socket.close(None).await;
                            }
                            ServerBehavior::SendFrames(frames) => {
                                for frame in frames {
                                    let _ = socket.send(Message::text(frame.clone())).await;
                                }
                                while let Some(Ok(_)) = socket.next().await {}
                            }
                            ServerBehavior::Hold => {
                                while let Some(Ok(_)) = socket.next().await {}
                            }
                        }
                    }
                    concurrent.fetch_sub(1, Ordering::SeqCst);
                });
            }
        });

        Self {
            addr,
            accepted,
            max_concurrent,
        }
    }

    /// Connection URL for this server.
    pub fn url(&self) -> String {
        format!("ws://{}/ws/events", self.addr)
    }
}

/// Gateway fake serving a scripted sequence of unread counts.
pub struct FakeGateway {
    counts: Mutex<Vec<u64>>,
    /// Number of `unread_count` calls observed.
    pub count_calls: AtomicUsize,
    /// Whether `mark_all_read` should fail.
    pub fail_mark_read: bool,
}

impl FakeGateway {
    /// Serve the given counts in order; the last one repeats.
    pub fn with_counts(counts: Vec<u64>) -> Arc<Self> {
        Arc::new(Self {
            counts: Mutex::new(counts),
            count_calls: AtomicUsize::new(0),
            fail_mark_read: false,
        })
    }
}

#[async_trait]
impl NotificationsGateway for FakeGateway {
    async fn list(&self, _skip: u64, _limit: u64) -> AppResult<NotificationPage> {
        Ok(NotificationPage {
            notifications: Vec::new(),
            total: 0,
        })
    }

    async fn unread_count(&self) -> AppResult<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        let mut counts = self.counts.lock().expect("counts lock");
        if counts.len() > 1 {
            Ok(counts.remove(0))
        } else {
            counts.first().copied().ok_or_else(|| {
                AppError::external_service("no scripted count")
            })
        }
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        if self.fail_mark_read {
            Err(AppError::transport("connection reset"))
        } else {
            Ok(())
        }
    }
}

/// Notifier fake recording every shown alert.
pub struct RecordingNotifier {
    permission: Mutex<PermissionState>,
    /// Permission requests observed.
    pub requests: AtomicUsize,
    shown: Mutex<Vec<NativeAlert>>,
}

impl RecordingNotifier {
    pub fn new(permission: PermissionState) -> Arc<Self> {
        Arc::new(Self {
            permission: Mutex::new(permission),
            requests: AtomicUsize::new(0),
            shown: Mutex::new(Vec::new()),
        })
    }

    /// Every alert shown so far.
    pub fn shown(&self) -> Vec<NativeAlert> {
        self.shown.lock().expect("shown lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn permission(&self) -> PermissionState {
        *self.permission.lock().expect("permission lock")
    }

    async fn request_permission(&self) -> PermissionState {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut permission = self.permission.lock().expect("permission lock");
        *permission = PermissionState::Granted;
        *permission
    }

    async fn show(&self, alert: NativeAlert) -> AppResult<()> {
        self.shown.lock().expect("shown lock").push(alert);
        Ok(())
    }
}

/// A session for the given roles.
pub fn session(roles: &[StaffRole]) -> AuthSession {
    AuthSession {
        restaurant_id: RestaurantId::new(),
        staff_id: StaffId::new(),
        roles: roles.iter().copied().collect::<HashSet<_>>(),
        token: "test-token".to_string(),
    }
}
