//! Office status notifier
//!
//! Polls a JSON document describing whether the club office is open and
//! announces changes to a chat webhook.

pub mod config;
pub mod detector;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod io;
pub mod notifier;
pub mod poller;
pub mod state;
pub mod status;
pub mod webhook;

pub use config::{load_config, NotifierConfig};
pub use error::{OfficeStatusError, Result};
pub use status::StatusRecord;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::fetcher::{HttpStatusSource, StatusSource};
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::poller::Poller;
use crate::state::StateStore;
use crate::webhook::WebhookNotifier;

/// How long the service keeps polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Poll on the configured interval until a shutdown signal arrives
    Continuous,
    /// Run a single poll cycle and exit
    Once,
}

/// Run the notifier with the given configuration
pub async fn run(config: NotifierConfig, mode: RunMode) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
        config.request_timeout_seconds,
    ))?);
    let cancel = CancellationToken::new();

    let source: Arc<dyn StatusSource> = Arc::new(HttpStatusSource::new(
        config.status_endpoint_url.clone(),
        Arc::clone(&http),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(WebhookNotifier::new(&config, Arc::clone(&http)));

    let mut poller = Poller::new(source, notifier, &config, cancel.clone());
    if let Some(path) = &config.state_file {
        poller = poller.with_state_store(StateStore::new(path));
    }

    if mode == RunMode::Once {
        let outcome = poller.poll_once().await;
        tracing::info!("Single poll finished: {:?}", outcome);
        return Ok(());
    }

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Office status notifier started");

    // Run the poller (blocks until cancelled)
    poller.run().await;

    tracing::info!("Office status notifier stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
