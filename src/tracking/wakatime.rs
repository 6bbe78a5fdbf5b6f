// WakaTime REST client

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use super::{DailyDurations, TimeTracker, TrackingError};
use crate::config::WakaTimeConfig;

/// Client for the `users/current/durations` endpoint
pub struct WakaTimeClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl WakaTimeClient {
    pub fn new(client: Client, config: &WakaTimeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: basic_authorization(&config.api_key),
        }
    }

    fn durations_url(&self) -> String {
        format!("{}/users/current/durations", self.base_url)
    }
}

/// WakaTime expects the bare API key, base64 encoded, as Basic credentials
fn basic_authorization(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(api_key))
}

#[async_trait]
impl TimeTracker for WakaTimeClient {
    async fn durations(&self, date: NaiveDate) -> Result<DailyDurations, TrackingError> {
        let day = date.format("%Y-%m-%d").to_string();
        tracing::debug!(%day, "Fetching tracked durations");

        let response = self
            .client
            .get(self.durations_url())
            .header(AUTHORIZATION, &self.authorization)
            .query(&[("date", day.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(TrackingError::Parse)
    }
}
