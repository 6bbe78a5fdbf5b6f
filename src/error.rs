//! Workflow error taxonomy
//!
//! Every failure of an invocation ends up as one `WorkflowError`. Callers see
//! only its `ErrorKind` and a fixed public message; the full chain is logged.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::github::GitHubError;
use crate::history::HistoryError;
use crate::tracking::TrackingError;

/// Classification exposed in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TimeTracking,
    History,
    SourceControl,
    StaleHead,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeTracking => "time_tracking",
            Self::History => "history",
            Self::SourceControl => "source_control",
            Self::StaleHead => "stale_head",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("time tracking query failed")]
    TimeTracking(#[from] TrackingError),
    #[error("history file unusable")]
    History(#[from] HistoryError),
    #[error("source control request failed")]
    SourceControl(#[source] GitHubError),
    #[error("commit rejected because the branch moved")]
    StaleHead(#[source] GitHubError),
    #[error("failed to construct service client")]
    Client(#[source] reqwest::Error),
}

impl From<GitHubError> for WorkflowError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::StaleHead(_) => Self::StaleHead(err),
            other => Self::SourceControl(other),
        }
    }
}

impl WorkflowError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TimeTracking(_) => ErrorKind::TimeTracking,
            Self::History(HistoryError::Serialize(_)) | Self::Client(_) => ErrorKind::Internal,
            Self::History(_) => ErrorKind::History,
            Self::SourceControl(_) => ErrorKind::SourceControl,
            Self::StaleHead(_) => ErrorKind::StaleHead,
        }
    }

    /// Message safe to hand back to callers
    pub const fn public_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::TimeTracking => "failed to fetch tracked durations",
            ErrorKind::History => "history file is missing or not a JSON array of entries",
            ErrorKind::SourceControl => "source control request failed",
            ErrorKind::StaleHead => "branch moved before the commit could be created",
            ErrorKind::Internal => "internal error",
        }
    }
}
