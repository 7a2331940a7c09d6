//! Office status record and the status document it is parsed from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation of the office, produced fresh on every fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub is_open: bool,
    #[serde(default)]
    pub changed_by: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl StatusRecord {
    pub fn new(is_open: bool) -> Self {
        Self {
            is_open,
            changed_by: None,
            timestamp: None,
        }
    }

    pub fn open() -> Self {
        Self::new(true)
    }

    pub fn closed() -> Self {
        Self::new(false)
    }

    pub fn with_changed_by(mut self, who: impl Into<String>) -> Self {
        self.changed_by = Some(who.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open {
            write!(f, "open")
        } else {
            write!(f, "closed")
        }
    }
}

/// Wire shape of the status endpoint.
///
/// Accepts both the `is_open`/`timestamp` layout and the sensor's older
/// `status`/`time` layout, where `status` is `1` for open, `0` for closed
/// and `-1` when the sensor has faulted. When both layouts are present
/// `is_open` and `timestamp` take precedence.
#[derive(Debug, Deserialize)]
struct StatusDocument {
    #[serde(default)]
    is_open: Option<bool>,
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    changed_by: Option<String>,
    #[serde(default)]
    timestamp: Option<RawTimestamp>,
    #[serde(default)]
    time: Option<RawTimestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Epoch(i64),
    EpochFractional(f64),
    Text(String),
}

impl RawTimestamp {
    fn into_datetime(self) -> crate::Result<DateTime<Utc>> {
        let parsed = match &self {
            RawTimestamp::Epoch(secs) => DateTime::from_timestamp(*secs, 0),
            RawTimestamp::EpochFractional(secs) => {
                DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
            }
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        parsed.ok_or_else(|| {
            crate::OfficeStatusError::Parse(format!("invalid timestamp {:?}", self))
        })
    }
}

/// Parse a status document body into a [`StatusRecord`]
pub fn parse_status(body: &str) -> crate::Result<StatusRecord> {
    let doc: StatusDocument = serde_json::from_str(body).map_err(|e| {
        crate::OfficeStatusError::Parse(format!("status document is not valid JSON: {}", e))
    })?;

    let is_open = match (doc.is_open, doc.status) {
        (Some(is_open), _) => is_open,
        (None, Some(1)) => true,
        (None, Some(0)) => false,
        (None, Some(code)) => {
            return Err(crate::OfficeStatusError::Parse(format!(
                "sensor reported fault status {}",
                code
            )))
        }
        (None, None) => {
            return Err(crate::OfficeStatusError::Parse(
                "status document is missing required field is_open".to_string(),
            ))
        }
    };

    let timestamp = doc
        .timestamp
        .or(doc.time)
        .map(RawTimestamp::into_datetime)
        .transpose()?;

    Ok(StatusRecord {
        is_open,
        changed_by: doc.changed_by.filter(|who| !who.trim().is_empty()),
        timestamp,
    })
}
