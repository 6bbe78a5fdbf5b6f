//! Appends today's tracked coding time to a JSON history file and commits the
//! result to a GitHub repository.
//!
//! One invocation is a straight line: fetch the day's durations from the time
//! tracking API, format them, append an entry to the local history baseline,
//! resolve the default branch head and commit the new file with that head as
//! the expected parent.

pub mod clients;
pub mod config;
pub mod error;
pub mod github;
pub mod handler;
pub mod history;
pub mod http;
pub mod logger;
pub mod report;
pub mod server;
pub mod tracking;
pub mod workflow;

#[cfg(test)]
mod fakes;
