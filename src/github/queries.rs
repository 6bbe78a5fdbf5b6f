// GraphQL documents and their request/response shapes

use serde::{Deserialize, Serialize};

pub const REPO_INFO_QUERY: &str = r"
query Repo($owner: String!, $repo: String!) {
  repository(name: $repo, owner: $owner) {
    defaultBranchRef {
      name
      target {
        ... on Commit {
          history(first: 1) {
            nodes {
              oid
            }
          }
        }
      }
    }
  }
}
";

pub const CREATE_COMMIT_MUTATION: &str = r"
mutation CreateCommit(
  $filePath: String!
  $branchName: String!
  $commitMessage: String!
  $repoNameWithOwner: String!
  $encodedContent: Base64String!
  $expectedHeadOid: GitObjectID!
) {
  createCommitOnBranch(
    input: {
      expectedHeadOid: $expectedHeadOid
      message: { headline: $commitMessage }
      branch: {
        branchName: $branchName
        repositoryNameWithOwner: $repoNameWithOwner
      }
      fileChanges: {
        additions: [{ path: $filePath, contents: $encodedContent }]
      }
    }
  ) {
    commit {
      url
    }
  }
}
";

/// POST body for the GraphQL endpoint
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl GraphQlError {
    /// Whether GitHub rejected the commit because `expectedHeadOid` is stale
    pub fn is_stale_head(&self) -> bool {
        if self.kind.as_deref() == Some("STALE_DATA") {
            return true;
        }
        let message = self.message.to_ascii_lowercase();
        message.contains("expectedheadoid")
            || message.contains("expected branch to point to")
    }
}

#[derive(Debug, Serialize)]
pub struct RepoInfoVariables<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitVariables<'a> {
    pub file_path: &'a str,
    pub branch_name: &'a str,
    pub commit_message: &'a str,
    pub repo_name_with_owner: &'a str,
    pub encoded_content: &'a str,
    pub expected_head_oid: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RepoInfoData {
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub target: Option<CommitTarget>,
}

#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<CommitHistory>,
}

#[derive(Debug, Deserialize)]
pub struct CommitHistory {
    pub nodes: Vec<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub oid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitData {
    pub create_commit_on_branch: Option<CreateCommitPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommitPayload {
    pub commit: Option<CommitUrl>,
}

#[derive(Debug, Deserialize)]
pub struct CommitUrl {
    pub url: String,
}
