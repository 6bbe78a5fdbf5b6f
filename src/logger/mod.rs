//! Logger module
//!
//! Provides logging utilities for the service including:
//! - Subscriber setup (level filter, text or JSON output, optional file)
//! - Server lifecycle logging
//! - Access logging
//! - Workflow error logging

pub mod writer;

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::{Method, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat, LoggingConfig};
use crate::error::WorkflowError;

/// Initialize the global subscriber with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes precedence
/// over `logging.level`.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let writer = writer::make_writer(config.log_file.as_deref())?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(config.log_file.is_none())
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        level = %config.logging.level,
        workers = ?config.server.workers,
        repository = %config.github.name_with_owner(),
        history = %config.history.file_path,
        "Server listening"
    );
}

/// Warn about every empty credential; they are not rejected up front
pub fn log_missing_credentials(config: &Config) {
    for name in config.missing_credentials() {
        tracing::warn!(variable = name, "Credential not configured, requests will fail downstream");
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!(error = ?err, "Failed to serve connection");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// One access log line per request
pub fn log_access(method: &Method, path: &str, status: StatusCode, elapsed: Duration) {
    tracing::info!(
        target: "access",
        %method,
        path,
        status = status.as_u16(),
        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        "request"
    );
}

/// Full error chain stays server-side; callers only see the classified kind
pub fn log_workflow_error(err: &WorkflowError) {
    let mut chain = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    tracing::error!(kind = %err.kind(), error = %chain, "Logging tracked time failed");
}
