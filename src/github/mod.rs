//! Source control collaborator
//!
//! Two GraphQL operations against GitHub: resolve the default branch and its
//! head commit, then create a commit on that branch guarded by the head OID.

mod client;
mod queries;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GitHubClient;

/// Default branch and the commit it currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub default_branch_name: String,
    pub head_commit_id: String,
}

/// Input for `createCommitOnBranch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// `owner/repo`
    pub repository_name_with_owner: String,
    pub branch_name: String,
    /// The commit fails if the branch no longer points here
    pub expected_head_oid: String,
    pub message: String,
    pub file_path: String,
    pub base64_contents: String,
}

/// Errors that can occur when talking to the GitHub GraphQL API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("branch head moved: {0}")]
    StaleHead(String),
    #[error("missing {0} in GraphQL response")]
    MissingData(&'static str),
}

#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn repository_ref(&self, owner: &str, repo: &str) -> Result<RepositoryRef, GitHubError>;

    /// Returns the URL of the created commit
    async fn create_commit(&self, request: &CommitRequest) -> Result<String, GitHubError>;
}
