//! HTTP response building module
//!
//! Every response carries the same CORS headers so the function can be
//! triggered from a browser.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::{ErrorKind, WorkflowError};

const ALLOW_ORIGIN: &str = "*";
const ALLOW_HEADERS: &str = "Content-Type";

/// Success body: `{"commitUrl": "..."}`
#[derive(Debug, Serialize)]
pub struct CommitResponse<'a> {
    #[serde(rename = "commitUrl")]
    pub commit_url: &'a str,
}

/// Failure body: `{"error": {"kind": "...", "message": "..."}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl ErrorResponse {
    pub const fn from_error(err: &WorkflowError) -> Self {
        Self {
            error: ErrorBody {
                kind: err.kind(),
                message: err.public_message(),
            },
        }
    }
}

fn with_cors(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(StatusCode::OK))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response with CORS headers
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let (status, json) = match serde_json::to_string(body) {
        Ok(json) => (status, json),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":{"kind":"internal","message":"internal error"}}"#.to_string(),
            )
        }
    };

    with_cors(Response::builder().status(status))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying the new commit's URL
pub fn build_commit_response(commit_url: &str) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &CommitResponse { commit_url })
}

/// Build 500 response with the classified error
pub fn build_error_response(err: &WorkflowError) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorResponse::from_error(err),
    )
}

/// Build 500 response for failures outside the workflow's own error taxonomy
pub fn build_internal_error_response() -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorResponse {
            error: ErrorBody {
                kind: ErrorKind::Internal,
                message: "internal error",
            },
        },
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
