//! Configuration types for the office status notifier

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_WEBHOOK_URL: &str = "OFFICE_STATUS_WEBHOOK_URL";
pub const ENV_ENDPOINT_URL: &str = "OFFICE_STATUS_ENDPOINT_URL";
pub const ENV_POLL_INTERVAL: &str = "OFFICE_STATUS_POLL_INTERVAL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub webhook_url: String,
    pub status_endpoint_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub webhook_kind: WebhookKind,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_true")]
    pub notify_on_startup: bool,
    #[serde(default = "default_true")]
    pub announce_outages: bool,
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// Chat platform the webhook belongs to; decides the payload shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookKind {
    #[default]
    Discord,
    Slack,
}

impl NotifierConfig {
    /// Build a config with defaults for everything but the two URLs
    pub fn new(webhook_url: impl Into<String>, status_endpoint_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            status_endpoint_url: status_endpoint_url.into(),
            poll_interval_seconds: default_poll_interval(),
            request_timeout_seconds: default_request_timeout(),
            webhook_kind: WebhookKind::default(),
            username: None,
            notify_on_startup: true,
            announce_outages: true,
            state_file: None,
        }
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> crate::Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given lookup; empty values are ignored
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            tracing::debug!("Webhook URL overridden by {}", ENV_WEBHOOK_URL);
            self.webhook_url = url;
        }
        if let Some(url) = lookup(ENV_ENDPOINT_URL) {
            tracing::debug!("Status endpoint overridden by {}", ENV_ENDPOINT_URL);
            self.status_endpoint_url = url;
        }
        if let Some(raw) = lookup(ENV_POLL_INTERVAL) {
            self.poll_interval_seconds = raw.trim().parse().map_err(|e| {
                crate::OfficeStatusError::Config(format!(
                    "{} must be a whole number of seconds, got {:?}: {}",
                    ENV_POLL_INTERVAL, raw, e
                ))
            })?;
            tracing::debug!(
                "Poll interval overridden by {}: {}s",
                ENV_POLL_INTERVAL,
                self.poll_interval_seconds
            );
        }
        Ok(())
    }

    /// Reject configurations the poller cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        validate_url("webhook_url", &self.webhook_url)?;
        validate_url("status_endpoint_url", &self.status_endpoint_url)?;

        if self.poll_interval_seconds == 0 {
            return Err(crate::OfficeStatusError::Config(
                "poll_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(crate::OfficeStatusError::Config(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::OfficeStatusError::Config(format!(
            "{} must not be empty",
            field
        )));
    }
    let url = reqwest::Url::parse(value).map_err(|e| {
        crate::OfficeStatusError::Config(format!("{} is not a valid URL ({}): {}", field, value, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(crate::OfficeStatusError::Config(format!(
            "{} must use http or https, got {}",
            field, other
        ))),
    }
}

fn default_poll_interval() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<NotifierConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::OfficeStatusError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        crate::OfficeStatusError::Config(format!("Invalid config file {:?}: {}", path, e))
    })
}
