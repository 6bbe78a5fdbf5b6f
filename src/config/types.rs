// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub wakatime: WakaTimeConfig,
    pub github: GitHubConfig,
    pub history: HistoryConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Seconds a connection may take to send its request headers
    pub header_read_timeout: u64,
}

/// Log output format
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    pub access_log: bool,
    /// Log file path (optional, stderr if not set)
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Time tracking API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WakaTimeConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Source control (GitHub GraphQL) configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    pub graphql_url: String,
    /// Repository owner
    pub username: String,
    pub repo_name: String,
    pub access_token: String,
}

impl GitHubConfig {
    /// `owner/repo`, as expected by `createCommitOnBranch`
    pub fn name_with_owner(&self) -> String {
        format!("{}/{}", self.username, self.repo_name)
    }
}

/// History file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Local working copy read as the baseline
    pub file_path: String,
    /// Path of the file inside the repository
    #[serde(default)]
    pub remote_path: Option<String>,
}

impl HistoryConfig {
    /// Repository path of the history file, falling back to the local file name
    pub fn remote_path(&self) -> String {
        if let Some(path) = &self.remote_path {
            return path.clone();
        }
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .map_or_else(|| self.file_path.clone(), ToString::to_string)
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout: u64,
    pub connect_timeout: u64,
    pub user_agent: String,
}
