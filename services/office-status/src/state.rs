//! Persistence for the last announced status

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::status::StatusRecord;

/// What the poller needs to remember between processes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default)]
    pub last_known: Option<StatusRecord>,
    #[serde(default)]
    pub outage_announced: bool,
}

/// JSON file holding the last announced status and the outage flag
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state; a missing file means nothing was announced yet
    pub fn load(&self) -> crate::Result<SavedState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SavedState::default())
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| {
            crate::OfficeStatusError::Parse(format!(
                "state file {:?} is corrupt: {}",
                self.path, e
            ))
        })
    }

    /// Replace the stored state, writing through a sibling temp file
    pub fn save(&self, state: &SavedState) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(state).map_err(|e| {
            crate::OfficeStatusError::Parse(format!("Failed to encode state: {}", e))
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!("Saved {:?} to {:?}", state, self.path);
        Ok(())
    }
}
