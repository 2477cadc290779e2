//! Client-side notification store.
//!
//! The single source of truth for list state and the unread counter; all
//! mutations flow through its operations, each of which is one guarded
//! state transition.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use savora_api::NotificationsGateway;
use savora_core::types::NotificationId;
use savora_core::AppResult;
use savora_entity::{NotificationKind, NotificationRecord};

/// Authoritative client-side notification state.
pub struct NotificationStore {
    /// REST gateway for page fetches and mutations.
    gateway: Arc<dyn NotificationsGateway>,
    /// Page size for history fetches.
    page_size: u64,
    /// Serializes fetches; concurrent load-more triggers coalesce.
    loading: AtomicBool,
    /// Guarded state; every operation is a single transition.
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    /// Full accumulated list, insertion-ordered, deduped by id.
    records: Vec<NotificationRecord>,
    /// Ids present in `records`.
    seen: HashSet<NotificationId>,
    /// Active category filter; `None` shows the full list.
    active_tab: Option<NotificationKind>,
    /// Active-tab view, recomputed whenever either input changes.
    visible: Vec<NotificationRecord>,
    /// Server-reported total across all pages.
    total: u64,
    /// Mirrored unread counter.
    unread: u64,
}

impl StoreState {
    fn recompute_view(&mut self) {
        let tab = self.active_tab;
        self.visible = self
            .records
            .iter()
            .filter(|r| tab.map_or(true, |tab| r.kind == tab))
            .cloned()
            .collect();
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore").finish()
    }
}

impl NotificationStore {
    /// Create a store over the given gateway.
    pub fn new(gateway: Arc<dyn NotificationsGateway>, page_size: u64) -> Self {
        Self {
            gateway,
            page_size,
            loading: AtomicBool::new(false),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Fetch a page of history.
    ///
    /// `load_more = false` replaces the full list and total; `load_more =
    /// true` appends only records whose id is not already cached,
    /// preserving arrival order. The active-tab view is recomputed either
    /// way. A fetch issued while another is in flight is ignored.
    pub async fn fetch(&self, load_more: bool) -> AppResult<()> {
        if self.loading.swap(true, Ordering::SeqCst) {
            debug!("fetch already in flight; ignoring");
            return Ok(());
        }

        let result = self.fetch_inner(load_more).await;
        self.loading.store(false, Ordering::SeqCst);

        if let Err(e) = &result {
            warn!(error = %e, load_more, "notification fetch failed");
        }
        result
    }

    async fn fetch_inner(&self, load_more: bool) -> AppResult<()> {
        let skip = if load_more {
            self.state.read().await.records.len() as u64
        } else {
            0
        };

        let page = self.gateway.list(skip, self.page_size).await?;

        let mut state = self.state.write().await;
        if !load_more {
            state.records.clear();
            state.seen.clear();
        }
        for record in page.notifications {
            if state.seen.insert(record.id) {
                state.records.push(record);
            }
        }
        state.total = page.total;
        state.recompute_view();
        Ok(())
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Switch the active category tab.
    ///
    /// A pure re-filter of the cached full list; never touches the network.
    pub async fn set_active_tab(&self, tab: Option<NotificationKind>) {
        let mut state = self.state.write().await;
        state.active_tab = tab;
        state.recompute_view();
    }

    /// Authoritative unread-count overwrite, from REST polls and count
    /// channel pushes alike.
    pub async fn set_unread_count(&self, count: u64) {
        let mut state = self.state.write().await;
        state.unread = count;
    }

    /// Mark everything read.
    ///
    /// Fires the REST mutation, then zeroes the local counter and flips
    /// cached `read_at` values regardless of the outcome. A failed mutation
    /// leaves the client optimistically desynchronized until the next
    /// authoritative poll or push corrects it.
    pub async fn mark_all_read(&self) -> AppResult<()> {
        let result = self.gateway.mark_all_read().await;
        if let Err(e) = &result {
            warn!(error = %e, "mark-all-read mutation failed; zeroing locally anyway");
        }

        let mut state = self.state.write().await;
        state.unread = 0;
        let now = Utc::now();
        for record in &mut state.records {
            record.mark_read(now);
        }
        state.recompute_view();

        result
    }

    /// The full accumulated list.
    pub async fn records(&self) -> Vec<NotificationRecord> {
        self.state.read().await.records.clone()
    }

    /// The active-tab view.
    pub async fn visible(&self) -> Vec<NotificationRecord> {
        self.state.read().await.visible.clone()
    }

    /// The active category tab.
    pub async fn active_tab(&self) -> Option<NotificationKind> {
        self.state.read().await.active_tab
    }

    /// The mirrored unread counter.
    pub async fn unread_count(&self) -> u64 {
        self.state.read().await.unread
    }

    /// The server-reported total across all pages.
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }
}
