//! The log-tracked-time workflow
//!
//! Strictly sequential: fetch durations, format, read the local history,
//! append, resolve the branch head, commit. The first failure aborts the run;
//! nothing is retried.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::WorkflowError;
use crate::github::{CommitRequest, SourceControl};
use crate::history::{TimeTrackedEntry, TimeTrackedHistory};
use crate::report::{self, DurationBreakdown};
use crate::tracking::TimeTracker;

/// Where the history lives, locally and in the repository
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub owner: String,
    pub repo: String,
    /// `owner/repo`
    pub name_with_owner: String,
    pub history_path: PathBuf,
    pub remote_path: String,
}

impl WorkflowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            owner: config.github.username.clone(),
            repo: config.github.repo_name.clone(),
            name_with_owner: config.github.name_with_owner(),
            history_path: PathBuf::from(&config.history.file_path),
            remote_path: config.history.remote_path(),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub commit_url: String,
    pub entry: TimeTrackedEntry,
    pub total_entries: usize,
}

pub struct LogTrackedTime {
    tracker: Box<dyn TimeTracker>,
    source_control: Box<dyn SourceControl>,
    settings: WorkflowSettings,
}

impl LogTrackedTime {
    pub fn new(
        tracker: Box<dyn TimeTracker>,
        source_control: Box<dyn SourceControl>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            tracker,
            source_control,
            settings,
        }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<CommitOutcome, WorkflowError> {
        let durations = self.tracker.durations(today).await?;
        let total = report::total_seconds(&durations.data);
        let breakdown = DurationBreakdown::from_seconds(total);
        tracing::debug!(
            records = durations.data.len(),
            total_seconds = total,
            hours = breakdown.hours,
            minutes = breakdown.minutes,
            "Aggregated durations"
        );

        let formatted_date = report::format_long_date(today);
        let entry = TimeTrackedEntry::new(formatted_date.clone(), report::format_duration(breakdown));

        let history = TimeTrackedHistory::load(&self.settings.history_path).await?;
        let updated = history.appended(&entry);
        let base64_contents = updated.to_base64()?;

        let repository = self
            .source_control
            .repository_ref(&self.settings.owner, &self.settings.repo)
            .await?;
        tracing::debug!(
            branch = %repository.default_branch_name,
            head = %repository.head_commit_id,
            "Resolved branch head"
        );

        let request = CommitRequest {
            repository_name_with_owner: self.settings.name_with_owner.clone(),
            branch_name: repository.default_branch_name,
            expected_head_oid: repository.head_commit_id,
            message: report::commit_message(&formatted_date),
            file_path: self.settings.remote_path.clone(),
            base64_contents,
        };
        let commit_url = self.source_control.create_commit(&request).await?;

        tracing::info!(
            %commit_url,
            date = %entry.date,
            duration = %entry.duration,
            entries = updated.len(),
            "Committed tracked time"
        );

        Ok(CommitOutcome {
            commit_url,
            entry,
            total_entries: updated.len(),
        })
    }
}
