// In-memory collaborators and a canned HTTP endpoint for tests

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::clients::ClientFactory;
use crate::error::WorkflowError;
use crate::github::{CommitRequest, GitHubError, RepositoryRef, SourceControl};
use crate::tracking::{DailyDurations, DurationRecord, TimeTracker, TrackingError};

pub struct FakeTracker {
    durations: Option<Vec<f64>>,
}

impl FakeTracker {
    pub fn new(durations: &[f64]) -> Self {
        Self {
            durations: Some(durations.to_vec()),
        }
    }

    pub const fn failing() -> Self {
        Self { durations: None }
    }
}

#[async_trait]
impl TimeTracker for FakeTracker {
    async fn durations(&self, date: NaiveDate) -> Result<DailyDurations, TrackingError> {
        let Some(durations) = &self.durations else {
            return Err(TrackingError::Status {
                status: 401,
                body: "invalid api key".to_string(),
            });
        };
        Ok(DailyDurations {
            data: durations
                .iter()
                .map(|&duration| DurationRecord { duration })
                .collect(),
            start: format!("{date}T00:00:00Z"),
            end: format!("{date}T23:59:59Z"),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ScmBehavior {
    Accept,
    /// Accept after holding the commit call open
    Slow(Duration),
    StaleHead,
    MissingRepository,
}

pub struct FakeSourceControl {
    behavior: ScmBehavior,
    calls: Arc<AtomicUsize>,
    commits: Arc<Mutex<Vec<CommitRequest>>>,
}

impl FakeSourceControl {
    pub fn new(behavior: ScmBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            commits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn commits(&self) -> Arc<Mutex<Vec<CommitRequest>>> {
        Arc::clone(&self.commits)
    }
}

#[async_trait]
impl SourceControl for FakeSourceControl {
    async fn repository_ref(&self, _owner: &str, _repo: &str) -> Result<RepositoryRef, GitHubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            ScmBehavior::MissingRepository => Err(GitHubError::MissingData("repository")),
            _ => Ok(RepositoryRef {
                default_branch_name: "main".to_string(),
                head_commit_id: "abc123".to_string(),
            }),
        }
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<String, GitHubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let ScmBehavior::Slow(delay) = self.behavior {
            tokio::time::sleep(delay).await;
        }
        match self.behavior {
            ScmBehavior::StaleHead => Err(GitHubError::StaleHead(format!(
                "Expected branch to point to \"{}\" but it did not.",
                request.expected_head_oid
            ))),
            _ => {
                self.commits
                    .lock()
                    .map_err(|_| GitHubError::GraphQl("poisoned".to_string()))?
                    .push(request.clone());
                Ok("https://github.com/octocat/coding-time/commit/f00d".to_string())
            }
        }
    }
}

/// Factory that counts how many collaborators it handed out
pub struct FakeClientFactory {
    durations: Vec<f64>,
    behavior: ScmBehavior,
    pub built: Arc<AtomicUsize>,
    /// Commits accepted by every source control handed out
    pub commits: Arc<Mutex<Vec<CommitRequest>>>,
}

impl FakeClientFactory {
    pub fn new(durations: &[f64], behavior: ScmBehavior) -> Self {
        Self {
            durations: durations.to_vec(),
            behavior,
            built: Arc::new(AtomicUsize::new(0)),
            commits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ClientFactory for FakeClientFactory {
    fn time_tracker(&self) -> Result<Box<dyn TimeTracker>, WorkflowError> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTracker::new(&self.durations)))
    }

    fn source_control(&self) -> Result<Box<dyn SourceControl>, WorkflowError> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSourceControl {
            behavior: self.behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            commits: Arc::clone(&self.commits),
        }))
    }
}

/// What the stub endpoint received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Local HTTP endpoint answering every request with one canned response
pub struct StubServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(status: StatusCode, payload: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let recorded = Arc::clone(&recorded);
                        async move {
                            let (parts, body) = req.into_parts();
                            let bytes = body.collect().await.unwrap().to_bytes();
                            recorded.lock().unwrap().push(RecordedRequest {
                                method: parts.method.to_string(),
                                uri: parts.uri.to_string(),
                                authorization: parts
                                    .headers
                                    .get(AUTHORIZATION)
                                    .map(|v| v.to_str().unwrap().to_string()),
                                body: String::from_utf8(bytes.to_vec()).unwrap(),
                            });
                            let response = Response::builder()
                                .status(status)
                                .header(CONTENT_TYPE, "application/json")
                                .body(Full::new(Bytes::from_static(payload.as_bytes())))
                                .unwrap();
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { url, requests }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
