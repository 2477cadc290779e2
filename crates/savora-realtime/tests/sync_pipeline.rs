//! End-to-end tests of the count and event pipelines at the orchestrator
//! boundary, with fakes standing in for the gateway and the native
//! notifier.

mod support;

use std::sync::Arc;

use serde_json::json;

use savora_core::config::alerts::AlertsConfig;
use savora_core::config::api::ApiConfig;
use savora_core::config::realtime::RealtimeConfig;
use savora_core::traits::PermissionState;
use savora_entity::StaffRole;
use savora_realtime::channel::types::PushMessage;
use savora_realtime::orchestrator::SyncOrchestrator;
use savora_realtime::visibility::Visibility;

use support::{session, FakeGateway, RecordingNotifier};

fn api_config() -> ApiConfig {
    ApiConfig {
        // Nothing in these tests opens a socket; the port only has to parse.
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: 1,
        page_size: 20,
    }
}

fn orchestrator(
    roles: &[StaffRole],
    gateway: Arc<FakeGateway>,
    notifier: Arc<RecordingNotifier>,
) -> SyncOrchestrator {
    SyncOrchestrator::new(
        &api_config(),
        RealtimeConfig::default(),
        AlertsConfig::default(),
        session(roles),
        gateway,
        notifier,
    )
}

fn count_message(count: u64) -> PushMessage {
    PushMessage {
        event: "notifications_unread".to_string(),
        payload: json!({ "count": count }),
    }
}

fn event_message(event: &str, payload: serde_json::Value) -> PushMessage {
    PushMessage {
        event: event.to_string(),
        payload,
    }
}

#[tokio::test]
async fn test_count_push_alerts_once_on_hidden_increase() {
    let gateway = FakeGateway::with_counts(vec![2]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway, notifier.clone());

    // Seed the baseline of 2 from the authoritative fetch.
    sync.refresh_unread().await;
    assert_eq!(sync.store().unread_count().await, 2);
    assert!(notifier.shown().is_empty());

    sync.set_visibility(Visibility::Hidden).await;

    // Push 5 while hidden: exactly one alert mentioning the new count.
    sync.handle_count_message(count_message(5)).await;
    assert_eq!(sync.store().unread_count().await, 5);
    let shown = notifier.shown();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].body.contains('5'));

    // Same count again: no increase, no alert.
    sync.handle_count_message(count_message(5)).await;
    assert_eq!(notifier.shown().len(), 1);
}

#[tokio::test]
async fn test_count_push_while_visible_shows_no_alert() {
    let gateway = FakeGateway::with_counts(vec![2]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway, notifier.clone());

    sync.refresh_unread().await;
    sync.handle_count_message(count_message(5)).await;

    assert_eq!(sync.store().unread_count().await, 5, "store still updated");
    assert!(notifier.shown().is_empty(), "foreground users get the badge");
}

#[tokio::test]
async fn test_kot_created_respects_role_filter() {
    let gateway = FakeGateway::with_counts(vec![0]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Waiter], gateway, notifier.clone());

    // Front-of-house roles do not need new-ticket noise.
    sync.handle_domain_event(event_message("kot_created", json!({"table_name": "T4"})))
        .await;
    assert!(notifier.shown().is_empty());

    // But rejections of their tickets reach them, visibility regardless.
    sync.handle_domain_event(event_message("kot_rejected", json!({"table_name": "T4"})))
        .await;
    let shown = notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Kitchen ticket rejected");
    assert!(shown[0].body.contains("T4"));
}

#[tokio::test]
async fn test_station_sees_creations_not_own_rejections() {
    let gateway = FakeGateway::with_counts(vec![0]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Kitchen], gateway, notifier.clone());

    sync.handle_domain_event(event_message("kot_created", json!({"table": 7})))
        .await;
    assert_eq!(notifier.shown().len(), 1);

    sync.handle_domain_event(event_message("kot_rejected", json!({"table": 7})))
        .await;
    assert_eq!(notifier.shown().len(), 1, "stations skip their own rejections");
}

#[tokio::test]
async fn test_generic_order_and_control_events_ignored() {
    let gateway = FakeGateway::with_counts(vec![0]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway, notifier.clone());

    sync.handle_domain_event(event_message("order", json!({"table": 1})))
        .await;
    sync.handle_domain_event(event_message("events_connected", json!({})))
        .await;
    sync.handle_domain_event(event_message("pong", json!({})))
        .await;

    assert!(notifier.shown().is_empty());
}

#[tokio::test]
async fn test_visibility_regain_refetches_count() {
    let gateway = FakeGateway::with_counts(vec![2, 7]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway.clone(), notifier);

    sync.refresh_unread().await;
    assert_eq!(sync.store().unread_count().await, 2);

    sync.set_visibility(Visibility::Hidden).await;
    sync.set_visibility(Visibility::Visible).await;

    assert_eq!(
        sync.store().unread_count().await,
        7,
        "regaining visibility re-fetches the authoritative count"
    );

    sync.shutdown().await;
}

#[tokio::test]
async fn test_count_alias_event_accepted() {
    let gateway = FakeGateway::with_counts(vec![1]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway, notifier);

    sync.handle_count_message(PushMessage {
        event: "count_update".to_string(),
        payload: json!({ "count": "3" }),
    })
    .await;

    assert_eq!(sync.store().unread_count().await, 3);
}

#[tokio::test]
async fn test_unrelated_event_on_count_channel_ignored() {
    let gateway = FakeGateway::with_counts(vec![1]);
    let notifier = RecordingNotifier::new(PermissionState::Granted);
    let sync = orchestrator(&[StaffRole::Admin], gateway, notifier);

    sync.store().set_unread_count(4).await;
    sync.handle_count_message(PushMessage {
        event: "notifications_connected".to_string(),
        payload: json!({}),
    })
    .await;

    assert_eq!(sync.store().unread_count().await, 4, "count untouched");
}
