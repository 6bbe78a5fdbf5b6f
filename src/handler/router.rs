//! Request dispatch module
//!
//! Entry point for HTTP request processing: answers CORS preflight directly,
//! treats every other method as a trigger for the workflow. The workflow runs
//! in its own task so a dropped connection never cancels it halfway through.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::error::WorkflowError;
use crate::http;
use crate::logger;
use crate::workflow::{CommitOutcome, LogTrackedTime, WorkflowSettings};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = if method == Method::OPTIONS {
        http::build_options_response()
    } else {
        let today = today();
        let invocation = Arc::clone(&state);
        match tokio::spawn(async move { log_tracked_time(&invocation, today).await }).await {
            Ok(response) => response,
            Err(e) => {
                logger::log_error(&format!("Workflow task failed: {e}"));
                http::build_internal_error_response()
            }
        }
    };

    if state.config.logging.access_log {
        logger::log_access(&method, &path, response.status(), started.elapsed());
    }
    Ok(response)
}

/// Run one invocation and map the outcome to a response
pub async fn log_tracked_time(state: &AppState, today: NaiveDate) -> Response<Full<Bytes>> {
    match invoke(state, today).await {
        Ok(outcome) => http::build_commit_response(&outcome.commit_url),
        Err(err) => {
            logger::log_workflow_error(&err);
            http::build_error_response(&err)
        }
    }
}

/// Build this invocation's collaborators and run the workflow
pub async fn invoke(state: &AppState, today: NaiveDate) -> Result<CommitOutcome, WorkflowError> {
    let workflow = LogTrackedTime::new(
        state.clients.time_tracker()?,
        state.clients.source_control()?,
        WorkflowSettings::from_config(&state.config),
    );
    workflow.run(today).await
}

/// Current local date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
