//! Error types for the office status notifier

/// Errors that can occur while polling the office status and notifying
#[derive(Debug, thiserror::Error)]
pub enum OfficeStatusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Notify error: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OfficeStatusError {
    /// True for errors raised while obtaining the status document
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            OfficeStatusError::Network(_) | OfficeStatusError::Parse(_)
        )
    }
}

/// Result type alias for office status operations
pub type Result<T> = std::result::Result<T, OfficeStatusError>;
