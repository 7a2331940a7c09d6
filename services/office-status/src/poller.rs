//! Poller: fetches the office status, decides, and dispatches announcements

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::NotifierConfig;
use crate::detector::should_notify;
use crate::fetcher::StatusSource;
use crate::notifier::{Notification, Notifier};
use crate::state::{SavedState, StateStore};
use crate::status::StatusRecord;

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Status matches the last announcement
    Unchanged,
    /// A status change was announced
    Notified,
    /// First observation taken silently (`notify_on_startup = false`)
    Adopted,
    /// The status could not be fetched; nothing was sent
    FetchFailed,
    /// An announcement was due but the webhook rejected it
    NotifyFailed,
    /// The status source is failing and this was announced
    OutageAnnounced,
}

/// Drives the fetch → compare → format → send cycle.
///
/// Owns the last announced status. It is only replaced after an
/// announcement succeeds, so a failed webhook call is retried by the next
/// cycle as long as the office is still in the new state.
pub struct Poller {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    notify_on_startup: bool,
    announce_outages: bool,
    store: Option<StateStore>,
    last_known: Option<StatusRecord>,
    outage_announced: bool,
    consecutive_failures: u32,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("source", &self.source)
            .field("notifier", &self.notifier)
            .field("interval", &self.interval)
            .field("last_known", &self.last_known)
            .field("outage_announced", &self.outage_announced)
            .finish()
    }
}

impl Poller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        config: &NotifierConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            interval: Duration::from_secs(config.poll_interval_seconds),
            notify_on_startup: config.notify_on_startup,
            announce_outages: config.announce_outages,
            store: None,
            last_known: None,
            outage_announced: false,
            consecutive_failures: 0,
            cancel,
        }
    }

    /// Persist the last announced status and outage flag in `store`,
    /// seeding both from the file
    pub fn with_state_store(mut self, store: StateStore) -> Self {
        match store.load() {
            Ok(saved) => {
                if let Some(record) = &saved.last_known {
                    tracing::info!(
                        "Restored last known status '{}' from {:?}",
                        record,
                        store.path()
                    );
                } else {
                    tracing::debug!("No saved status at {:?}", store.path());
                }
                if saved.outage_announced {
                    tracing::info!("Restored an already announced status outage");
                }
                self.last_known = saved.last_known;
                self.outage_announced = saved.outage_announced;
            }
            Err(e) => {
                tracing::warn!("Ignoring saved status: {}", e);
            }
        }
        self.store = Some(store);
        self
    }

    pub fn last_known(&self) -> Option<&StatusRecord> {
        self.last_known.as_ref()
    }

    pub fn outage_announced(&self) -> bool {
        self.outage_announced
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Run one fetch → compare → notify cycle
    pub async fn poll_once(&mut self) -> PollOutcome {
        match self.source.fetch().await {
            Ok(current) => self.handle_status(current).await,
            Err(e) if e.is_fetch_error() => self.handle_fetch_error(e).await,
            Err(e) => {
                tracing::warn!("Status source {} failed: {}", self.source.endpoint(), e);
                PollOutcome::FetchFailed
            }
        }
    }

    async fn handle_status(&mut self, current: StatusRecord) -> PollOutcome {
        if self.consecutive_failures > 0 {
            tracing::info!(
                "Status source {} recovered after {} failed polls",
                self.source.endpoint(),
                self.consecutive_failures
            );
            self.consecutive_failures = 0;
        }

        // after an announced outage the current status is always re-announced
        let recovering = self.outage_announced;

        if self.last_known.is_none() && !self.notify_on_startup && !recovering {
            tracing::info!("Office is {}; startup announcement disabled", current);
            self.remember(current);
            return PollOutcome::Adopted;
        }

        if !recovering && !should_notify(self.last_known.as_ref(), &current) {
            tracing::debug!("Office still {}", current);
            return PollOutcome::Unchanged;
        }

        let notification = Notification::for_status(&current);
        match self.notifier.send(&notification).await {
            Ok(()) => {
                tracing::info!(
                    "Announced via {}: {}",
                    self.notifier.type_name(),
                    notification.message
                );
                self.outage_announced = false;
                self.remember(current);
                PollOutcome::Notified
            }
            Err(e) => {
                tracing::warn!(
                    "Announcement via {} failed, will retry next poll: {}",
                    self.notifier.type_name(),
                    e
                );
                PollOutcome::NotifyFailed
            }
        }
    }

    async fn handle_fetch_error(&mut self, error: crate::OfficeStatusError) -> PollOutcome {
        self.consecutive_failures += 1;
        tracing::warn!(
            "Failed to fetch office status from {} ({} in a row): {}",
            self.source.endpoint(),
            self.consecutive_failures,
            error
        );

        if !self.announce_outages || self.outage_announced {
            return PollOutcome::FetchFailed;
        }

        match self.notifier.send(&Notification::outage()).await {
            Ok(()) => {
                tracing::info!("Announced status outage via {}", self.notifier.type_name());
                self.outage_announced = true;
                self.persist();
                PollOutcome::OutageAnnounced
            }
            Err(e) => {
                tracing::warn!("Outage announcement failed: {}", e);
                PollOutcome::NotifyFailed
            }
        }
    }

    fn remember(&mut self, record: StatusRecord) {
        self.last_known = Some(record);
        self.persist();
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            let saved = SavedState {
                last_known: self.last_known.clone(),
                outage_announced: self.outage_announced,
            };
            if let Err(e) = store.save(&saved) {
                tracing::warn!("Failed to save status to {:?}: {}", store.path(), e);
            }
        }
    }

    /// Poll on the configured interval. Returns when the cancellation token is triggered.
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling {} every {}s",
            self.source.endpoint(),
            self.interval.as_secs()
        );

        loop {
            let outcome = self.poll_once().await;
            tracing::debug!("Poll finished: {:?}", outcome);

            // Wait for the next poll or cancellation
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}
