//! Time tracked history file
//!
//! The history is an append-only JSON array of `{date, duration}` objects.
//! It is read from the local working copy and only ever written back through
//! a commit, never to the local file. Prior elements are carried as raw JSON
//! so hand edits and unknown fields survive a rewrite unchanged.

use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One day's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTrackedEntry {
    pub date: String,
    pub duration: String,
}

impl TimeTrackedEntry {
    pub fn new(date: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            duration: duration.into(),
        }
    }

    /// JSON object with `date` before `duration`
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "date": self.date,
            "duration": self.duration,
        })
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize history")]
    Serialize(#[from] serde_json::Error),
}

/// Entries in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeTrackedHistory {
    entries: Vec<Value>,
}

impl TimeTrackedHistory {
    pub fn new(entries: &[TimeTrackedEntry]) -> Self {
        Self {
            entries: entries.iter().map(TimeTrackedEntry::to_value).collect(),
        }
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read and parse the history file at `path`
    pub async fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HistoryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content).map_err(|source| HistoryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A copy with `entry` as the trailing element; `self` is left untouched
    #[must_use]
    pub fn appended(&self, entry: &TimeTrackedEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry.to_value());
        Self { entries }
    }

    /// Pretty JSON with 2-space indentation
    pub fn to_pretty_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Payload for a commit file addition
    pub fn to_base64(&self) -> Result<String, HistoryError> {
        Ok(STANDARD.encode(self.to_pretty_json()?))
    }
}
