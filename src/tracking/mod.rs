//! Time tracking collaborator
//!
//! The workflow only needs one read: "my durations for date X". The trait
//! keeps the HTTP client swappable for tests.

mod wakatime;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use wakatime::WakaTimeClient;

/// One tracked interval
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DurationRecord {
    /// Length in seconds
    pub duration: f64,
}

/// Full response for one day's query
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyDurations {
    pub data: Vec<DurationRecord>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Errors that can occur when querying the time tracking API.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
    #[error("time tracking API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse durations response")]
    Parse(#[source] reqwest::Error),
}

#[async_trait]
pub trait TimeTracker: Send + Sync {
    /// Per-interval durations recorded on `date`
    async fn durations(&self, date: NaiveDate) -> Result<DailyDurations, TrackingError>;
}
