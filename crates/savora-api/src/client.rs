//! `reqwest`-based implementation of the notifications gateway.

use async_trait::async_trait;
use tracing::debug;

use savora_core::config::api::ApiConfig;
use savora_core::types::RestaurantId;
use savora_core::{AppError, AppResult};
use savora_entity::AuthSession;

use crate::gateway::{NotificationPage, NotificationsGateway};
use crate::types::{ApiEnvelope, NotificationListData, UnreadCountData};

/// HTTP client for the back-office notification endpoints.
///
/// One client is built per authenticated session; the restaurant scope and
/// token are baked in at construction.
#[derive(Debug)]
pub struct BackofficeClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// API base URL, without a trailing slash.
    base_url: String,
    /// Restaurant scope sent on every request.
    restaurant_id: RestaurantId,
    /// Bearer token.
    token: String,
}

impl BackofficeClient {
    /// Build a client for the given session.
    pub fn new(config: &ApiConfig, session: &AuthSession) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            restaurant_id: session.restaurant_id,
            token: session.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl NotificationsGateway for BackofficeClient {
    async fn list(&self, skip: u64, limit: u64) -> AppResult<NotificationPage> {
        debug!(skip, limit, "fetching notification page");

        let response = self
            .http
            .get(self.endpoint("notifications"))
            .query(&[
                ("restaurant_id", self.restaurant_id.to_string()),
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
            ])
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<NotificationListData> = response.json().await?;
        let data = envelope.into_data()?;

        Ok(NotificationPage {
            notifications: data.notifications,
            total: data.total,
        })
    }

    async fn unread_count(&self) -> AppResult<u64> {
        let response = self
            .http
            .get(self.endpoint("notifications/unread-count"))
            .query(&[("restaurant_id", self.restaurant_id.to_string())])
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<UnreadCountData> = response.json().await?;
        let data = envelope.into_data()?;

        data.count
            .as_u64()
            .ok_or_else(|| AppError::external_service("Unparseable unread count in response"))
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        let response = self
            .http
            .patch(self.endpoint("notifications/mark-read"))
            .query(&[("restaurant_id", self.restaurant_id.to_string())])
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "mark_all": true }))
            .send()
            .await?
            .error_for_status()?;

        // Mutation responses carry no payload worth keeping; only the
        // status matters.
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        if envelope.status == "error" {
            return Err(AppError::external_service("mark-read mutation rejected"));
        }

        Ok(())
    }
}
