// Configuration module entry point
// Loads service configuration and holds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, GitHubConfig, HistoryConfig, HttpConfig, LogFormat, LoggingConfig, ServerConfig,
    WakaTimeConfig,
};

/// Well-known environment variables and the keys they override
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("REPO_NAME", "github.repo_name"),
    ("GITHUB_USERNAME", "github.username"),
    ("WAKATIME_API_KEY", "wakatime.api_key"),
    ("GITHUB_ACCESS_TOKEN", "github.access_token"),
];

/// Load `KEY=value` lines from `path` into the process environment
///
/// A missing file is skipped; variables already set are never overwritten.
pub fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// A missing file is not an error; defaults and environment fill the gaps
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("TTL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8888)?
            .set_default("server.header_read_timeout", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.access_log", true)?
            .set_default("wakatime.base_url", "https://wakatime.com/api/v1")?
            .set_default("wakatime.api_key", "")?
            .set_default("github.graphql_url", "https://api.github.com/graphql")?
            .set_default("github.username", "")?
            .set_default("github.repo_name", "")?
            .set_default("github.access_token", "")?
            .set_default("history.file_path", "time-tracked.json")?
            .set_default("http.timeout", 30)?
            .set_default("http.connect_timeout", 10)?
            .set_default(
                "http.user_agent",
                concat!("tracked-time-logger/", env!("CARGO_PKG_VERSION")),
            )?;

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Names of credentials that are empty; these fail downstream, not here
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("REPO_NAME", self.github.repo_name.as_str()),
            ("GITHUB_USERNAME", self.github.username.as_str()),
            ("WAKATIME_API_KEY", self.wakatime.api_key.as_str()),
            ("GITHUB_ACCESS_TOKEN", self.github.access_token.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
