//! Status endpoint client

use std::sync::Arc;

use async_trait::async_trait;

use crate::io::HttpClient;
use crate::status::{parse_status, StatusRecord};

/// Trait for obtaining the current office status
#[async_trait]
pub trait StatusSource: Send + Sync + std::fmt::Debug {
    /// Where the status comes from, for logs and message footers
    fn endpoint(&self) -> &str;

    /// Fetch and parse the current status
    async fn fetch(&self) -> crate::Result<StatusRecord>;
}

/// GET the status document at `endpoint_url` and parse it.
///
/// Connection failures, timeouts and non-2xx responses are
/// [`Network`](crate::OfficeStatusError::Network) errors; a body that does not
/// describe a status is a [`Parse`](crate::OfficeStatusError::Parse) error.
pub async fn fetch_status(
    http: &dyn HttpClient,
    endpoint_url: &str,
) -> crate::Result<StatusRecord> {
    let response = http.get(endpoint_url).await?;

    if !response.is_success() {
        return Err(crate::OfficeStatusError::Network(format!(
            "status endpoint {} returned status {}",
            endpoint_url, response.status
        )));
    }

    let record = parse_status(&response.body)?;
    tracing::debug!(
        "Fetched status from {}: {} (changed_by={:?}, timestamp={:?})",
        endpoint_url,
        record,
        record.changed_by,
        record.timestamp
    );
    Ok(record)
}

/// Status source backed by an HTTP JSON endpoint
pub struct HttpStatusSource {
    endpoint_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HttpStatusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStatusSource")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl HttpStatusSource {
    pub fn new(endpoint_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let endpoint_url = endpoint_url.into();
        tracing::debug!("Created HttpStatusSource for {}", endpoint_url);
        Self { endpoint_url, http }
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    fn endpoint(&self) -> &str {
        &self.endpoint_url
    }

    async fn fetch(&self) -> crate::Result<StatusRecord> {
        fetch_status(self.http.as_ref(), &self.endpoint_url).await
    }
}
