//! Request handler module
//!
//! Maps inbound calls onto the log-tracked-time workflow.

pub mod router;

// Re-export main entry point
pub use router::{handle_request, invoke, log_tracked_time, today};
