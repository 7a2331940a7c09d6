//! Notifier trait for delivering announcements

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::format::{format_message, format_outage};
use crate::status::StatusRecord;

/// What an announcement is about; webhooks use it to pick colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Opened,
    Closed,
    Outage,
}

/// A notification to be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn for_status(record: &StatusRecord) -> Self {
        let kind = if record.is_open {
            NotificationKind::Opened
        } else {
            NotificationKind::Closed
        };
        Self {
            kind,
            message: format_message(record),
        }
    }

    pub fn outage() -> Self {
        Self {
            kind: NotificationKind::Outage,
            message: format_outage(),
        }
    }
}

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "discord")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn send(&self, notification: &Notification) -> crate::Result<()>;
}
