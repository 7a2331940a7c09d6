//! Chat webhook notification client (Discord and Slack incoming webhooks)

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::{NotifierConfig, WebhookKind};
use crate::io::HttpClient;
use crate::notifier::{Notification, NotificationKind, Notifier};

const EMBED_TITLE: &str = "Office Status";
const OPEN_COLOR: u32 = 0x4B90FF;
const CLOSED_COLOR: u32 = 0xFF2002;
const OUTAGE_COLOR: u32 = 0xFFCC00;

/// Webhook notification sender
pub struct WebhookNotifier {
    webhook_url: String,
    kind: WebhookKind,
    username: Option<String>,
    source_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for WebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the webhook URL embeds its secret token
        f.debug_struct("WebhookNotifier")
            .field("kind", &self.kind)
            .field("username", &self.username)
            .finish()
    }
}

impl WebhookNotifier {
    pub fn new(config: &NotifierConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created WebhookNotifier for {:?} webhook", config.webhook_kind);

        Self {
            webhook_url: config.webhook_url.clone(),
            kind: config.webhook_kind,
            username: config.username.clone(),
            source_url: config.status_endpoint_url.clone(),
            http,
        }
    }

    /// Build the JSON body the target platform expects
    pub fn payload(&self, notification: &Notification) -> Value {
        match self.kind {
            WebhookKind::Slack => json!({ "text": notification.message }),
            WebhookKind::Discord => {
                let color = match notification.kind {
                    NotificationKind::Opened => OPEN_COLOR,
                    NotificationKind::Closed => CLOSED_COLOR,
                    NotificationKind::Outage => OUTAGE_COLOR,
                };
                let mut body = json!({
                    "content": notification.message,
                    "embeds": [{
                        "title": EMBED_TITLE,
                        "color": color,
                        "footer": { "text": format!("Source: {}", self.source_url) },
                    }],
                });
                if let Some(username) = &self.username {
                    body["username"] = json!(username);
                }
                body
            }
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn type_name(&self) -> &str {
        match self.kind {
            WebhookKind::Discord => "discord",
            WebhookKind::Slack => "slack",
        }
    }

    async fn send(&self, notification: &Notification) -> crate::Result<()> {
        let body = self.payload(notification);

        tracing::debug!(
            "Sending {} webhook notification: {}",
            self.type_name(),
            notification.message
        );

        let response = self
            .http
            .post_json(&self.webhook_url, &body)
            .await
            .map_err(|e| crate::OfficeStatusError::Notify(e.to_string()))?;

        if !response.is_success() {
            return Err(crate::OfficeStatusError::Notify(format!(
                "{} webhook returned status {}: {}",
                self.type_name(),
                response.status,
                response.body
            )));
        }

        tracing::debug!("Webhook notification sent successfully");
        Ok(())
    }
}
