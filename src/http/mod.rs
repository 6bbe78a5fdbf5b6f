//! HTTP protocol layer module
//!
//! Response builders shared by the request handler and the one-shot CLI.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_commit_response, build_error_response, build_internal_error_response,
    build_json_response, build_options_response, CommitResponse, ErrorResponse,
};
