//! Collaborator construction
//!
//! Clients are built per invocation through a `ClientFactory`; nothing is
//! cached between requests.

use std::time::Duration;

use reqwest::Client;

use crate::config::{Config, GitHubConfig, HttpConfig, WakaTimeConfig};
use crate::error::WorkflowError;
use crate::github::{GitHubClient, SourceControl};
use crate::tracking::{TimeTracker, WakaTimeClient};

pub trait ClientFactory: Send + Sync {
    fn time_tracker(&self) -> Result<Box<dyn TimeTracker>, WorkflowError>;
    fn source_control(&self) -> Result<Box<dyn SourceControl>, WorkflowError>;
}

/// Builds HTTP-backed clients from configuration
pub struct HttpClientFactory {
    wakatime: WakaTimeConfig,
    github: GitHubConfig,
    http: HttpConfig,
}

impl HttpClientFactory {
    pub fn from_config(config: &Config) -> Self {
        Self {
            wakatime: config.wakatime.clone(),
            github: config.github.clone(),
            http: config.http.clone(),
        }
    }
}

/// Fresh `reqwest` client with the configured timeouts
pub fn build_http_client(http: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout))
        .connect_timeout(Duration::from_secs(http.connect_timeout))
        .user_agent(&http.user_agent)
        .build()
}

impl ClientFactory for HttpClientFactory {
    fn time_tracker(&self) -> Result<Box<dyn TimeTracker>, WorkflowError> {
        let client = build_http_client(&self.http).map_err(WorkflowError::Client)?;
        Ok(Box::new(WakaTimeClient::new(client, &self.wakatime)))
    }

    fn source_control(&self) -> Result<Box<dyn SourceControl>, WorkflowError> {
        let client = build_http_client(&self.http).map_err(WorkflowError::Client)?;
        Ok(Box::new(GitHubClient::new(client, &self.github)))
    }
}
