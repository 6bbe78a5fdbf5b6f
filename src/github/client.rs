// GitHub GraphQL client

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::queries::{
    CreateCommitData, CreateCommitVariables, GraphQlError, GraphQlRequest, GraphQlResponse,
    RepoInfoData, RepoInfoVariables, CREATE_COMMIT_MUTATION, REPO_INFO_QUERY,
};
use super::{CommitRequest, GitHubError, RepositoryRef, SourceControl};
use crate::config::GitHubConfig;

/// Client for the GitHub GraphQL endpoint
pub struct GitHubClient {
    client: Client,
    endpoint: String,
    authorization: String,
}

impl GitHubClient {
    pub fn new(client: Client, config: &GitHubConfig) -> Self {
        Self {
            client,
            endpoint: config.graphql_url.clone(),
            authorization: format!("Bearer {}", config.access_token),
        }
    }

    /// Send one GraphQL document and return its `data`
    async fn request<V, T>(&self, query: &str, variables: V) -> Result<T, GitHubError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            return Err(classify_errors(&body.errors));
        }
        body.data.ok_or(GitHubError::MissingData("data"))
    }
}

/// Collapse a GraphQL `errors` array into one error
fn classify_errors(errors: &[GraphQlError]) -> GitHubError {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    if errors.iter().any(GraphQlError::is_stale_head) {
        GitHubError::StaleHead(message)
    } else {
        GitHubError::GraphQl(message)
    }
}

fn repository_ref_from(data: RepoInfoData) -> Result<RepositoryRef, GitHubError> {
    let branch = data
        .repository
        .ok_or(GitHubError::MissingData("repository"))?
        .default_branch_ref
        .ok_or(GitHubError::MissingData("default branch"))?;
    let head = branch
        .target
        .and_then(|target| target.history)
        .and_then(|history| history.nodes.into_iter().next())
        .ok_or(GitHubError::MissingData("head commit"))?;

    Ok(RepositoryRef {
        default_branch_name: branch.name,
        head_commit_id: head.oid,
    })
}

fn commit_url_from(data: CreateCommitData) -> Result<String, GitHubError> {
    data.create_commit_on_branch
        .and_then(|payload| payload.commit)
        .map(|commit| commit.url)
        .ok_or(GitHubError::MissingData("commit"))
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn repository_ref(&self, owner: &str, repo: &str) -> Result<RepositoryRef, GitHubError> {
        tracing::debug!(owner, repo, "Resolving default branch head");
        let data = self
            .request(REPO_INFO_QUERY, RepoInfoVariables { owner, repo })
            .await?;
        repository_ref_from(data)
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<String, GitHubError> {
        tracing::debug!(
            repository = %request.repository_name_with_owner,
            branch = %request.branch_name,
            expected_head = %request.expected_head_oid,
            path = %request.file_path,
            "Creating commit"
        );
        let variables = CreateCommitVariables {
            file_path: &request.file_path,
            branch_name: &request.branch_name,
            commit_message: &request.message,
            repo_name_with_owner: &request.repository_name_with_owner,
            encoded_content: &request.base64_contents,
            expected_head_oid: &request.expected_head_oid,
        };
        let data = self.request(CREATE_COMMIT_MUTATION, variables).await?;
        commit_url_from(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, WorkflowError};
    use crate::fakes::StubServer;
    use hyper::StatusCode;

    #[test]
    fn test_repository_ref_from_full_response() {
        let data: RepoInfoData = serde_json::from_str(
            r#"{"repository": {"defaultBranchRef": {"name": "trunk", "target": {"history": {"nodes": [{"oid": "c0ffee"}]}}}}}"#,
        )
        .unwrap();
        assert_eq!(
            repository_ref_from(data).unwrap(),
            RepositoryRef {
                default_branch_name: "trunk".to_string(),
                head_commit_id: "c0ffee".to_string(),
            }
        );
    }

    #[test]
    fn test_repository_ref_missing_repository() {
        let data: RepoInfoData = serde_json::from_str(r#"{"repository": null}"#).unwrap();
        assert!(matches!(
            repository_ref_from(data),
            Err(GitHubError::MissingData("repository"))
        ));
    }

    #[test]
    fn test_repository_ref_empty_history() {
        let data: RepoInfoData = serde_json::from_str(
            r#"{"repository": {"defaultBranchRef": {"name": "main", "target": {"history": {"nodes": []}}}}}"#,
        )
        .unwrap();
        assert!(matches!(
            repository_ref_from(data),
            Err(GitHubError::MissingData("head commit"))
        ));
    }

    #[test]
    fn test_commit_url_from_payload() {
        let data: CreateCommitData = serde_json::from_str(
            r#"{"createCommitOnBranch": {"commit": {"url": "https://github.com/octocat/coding-time/commit/abc"}}}"#,
        )
        .unwrap();
        assert_eq!(
            commit_url_from(data).unwrap(),
            "https://github.com/octocat/coding-time/commit/abc"
        );
    }

    #[test]
    fn test_classify_errors() {
        let stale = classify_errors(&[GraphQlError {
            message: "Expected branch to point to \"abc\" but it did not.".to_string(),
            kind: None,
        }]);
        assert!(matches!(stale, GitHubError::StaleHead(_)));

        let other = classify_errors(&[
            GraphQlError {
                message: "first".to_string(),
                kind: None,
            },
            GraphQlError {
                message: "second".to_string(),
                kind: Some("FORBIDDEN".to_string()),
            },
        ]);
        match other {
            GitHubError::GraphQl(message) => assert_eq!(message, "first; second"),
            e => panic!("Expected GraphQl, got {e:?}"),
        }
    }

    fn client_for(stub: &StubServer) -> GitHubClient {
        GitHubClient::new(
            Client::new(),
            &GitHubConfig {
                graphql_url: stub.url.clone(),
                username: "octocat".to_string(),
                repo_name: "coding-time".to_string(),
                access_token: "ghp_token".to_string(),
            },
        )
    }

    fn commit_request() -> CommitRequest {
        CommitRequest {
            repository_name_with_owner: "octocat/coding-time".to_string(),
            branch_name: "main".to_string(),
            expected_head_oid: "abc123".to_string(),
            message: "update with time tracked for Monday, January 1st, 2024".to_string(),
            file_path: "time-tracked.json".to_string(),
            base64_contents: "W10=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_repository_ref_over_http() {
        let stub = StubServer::start(
            StatusCode::OK,
            r#"{"data": {"repository": {"defaultBranchRef": {"name": "main", "target": {"history": {"nodes": [{"oid": "abc123"}]}}}}}}"#,
        )
        .await;

        let repository = client_for(&stub)
            .repository_ref("octocat", "coding-time")
            .await
            .unwrap();
        assert_eq!(repository.default_branch_name, "main");
        assert_eq!(repository.head_commit_id, "abc123");

        let recorded = stub.recorded();
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer ghp_token"));
        let sent: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(sent["query"], REPO_INFO_QUERY);
        assert_eq!(
            sent["variables"],
            serde_json::json!({"owner": "octocat", "repo": "coding-time"})
        );
    }

    #[tokio::test]
    async fn test_create_commit_over_http() {
        let stub = StubServer::start(
            StatusCode::OK,
            r#"{"data": {"createCommitOnBranch": {"commit": {"url": "https://github.com/octocat/coding-time/commit/f00d"}}}}"#,
        )
        .await;

        let url = client_for(&stub).create_commit(&commit_request()).await.unwrap();
        assert_eq!(url, "https://github.com/octocat/coding-time/commit/f00d");

        let sent: serde_json::Value = serde_json::from_str(&stub.recorded()[0].body).unwrap();
        assert_eq!(sent["query"], CREATE_COMMIT_MUTATION);
        assert_eq!(sent["variables"]["expectedHeadOid"], "abc123");
        assert_eq!(sent["variables"]["encodedContent"], "W10=");
    }

    #[tokio::test]
    async fn test_stale_data_in_200_response() {
        let stub = StubServer::start(
            StatusCode::OK,
            r#"{"data": null, "errors": [{"type": "STALE_DATA", "message": "Expected branch to point to \"abc123\" but it did not."}]}"#,
        )
        .await;

        let err = client_for(&stub)
            .create_commit(&commit_request())
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::StaleHead(_)));
        assert_eq!(WorkflowError::from(err).kind(), ErrorKind::StaleHead);
    }

    #[tokio::test]
    async fn test_null_data_without_errors() {
        let stub = StubServer::start(StatusCode::OK, r#"{"data": null}"#).await;

        assert!(matches!(
            client_for(&stub).repository_ref("octocat", "coding-time").await,
            Err(GitHubError::MissingData("data"))
        ));
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let stub = StubServer::start(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Bad credentials"}"#,
        )
        .await;

        let err = client_for(&stub)
            .repository_ref("octocat", "coding-time")
            .await
            .unwrap_err();
        match &err {
            GitHubError::Status { status, body } => {
                assert_eq!(*status, 401);
                assert!(body.contains("Bad credentials"));
            }
            e => panic!("Expected Status error, got {e:?}"),
        }
        assert_eq!(WorkflowError::from(err).kind(), ErrorKind::SourceControl);
    }
}
