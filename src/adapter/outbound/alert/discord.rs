//! Discord webhook alert sender.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::format::webhook_payload;
use crate::domain::opportunity::Opportunity;
use crate::error::DeliveryError;
use crate::port::AlertSender;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts each opportunity as an embed to a Discord webhook.
pub struct DiscordWebhookSender {
    http: HttpClient,
    webhook_url: String,
    username: Option<String>,
}

impl DiscordWebhookSender {
    /// Create a sender for the given webhook URL.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self {
            http,
            webhook_url: webhook_url.into(),
            username: None,
        }
    }

    /// Override the webhook's display name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[async_trait]
impl AlertSender for DiscordWebhookSender {
    async fn send_alert(&self, opportunity: &Opportunity) -> Result<(), DeliveryError> {
        let payload = webhook_payload(opportunity, self.username.as_deref());
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }
        debug!(event_id = %opportunity.event_id, book = %opportunity.book, "Discord alert delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "discord"
    }
}
