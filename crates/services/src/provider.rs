//! Upstream match/team data provider.
//!
//! [`UpstreamProvider`] is the only seam between the enrichment core and the
//! outside world. [`HttpProvider`] talks to the vendor's REST API; tests use
//! mocks or in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;
use insight_models::{MatchRecord, TeamStats, UpstreamError};
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Full match record by slug or numeric id.
    async fn fetch_match_details(&self, identifier: &str) -> Result<MatchRecord, UpstreamError>;

    /// Past and upcoming matches of a team, most recent first.
    async fn fetch_team_match_history(&self, team_id: i64) -> Result<Vec<MatchRecord>, UpstreamError>;

    async fn fetch_team_stats(&self, team_slug: &str) -> Result<TeamStats, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub api_key: Option<String>,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bo3.gg/api/v1".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("match-insight/", env!("CARGO_PKG_VERSION")).to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UpstreamError::Transport {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        tracing::debug!("🌐 GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited { url });
        }
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status: status.as_u16() });
        }

        response.json::<Value>().await.map_err(|e| UpstreamError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout { url: url.to_string() }
    } else {
        UpstreamError::Transport {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

/// History endpoints answer either with a bare array or with the array
/// wrapped under `results` or `data`.
fn history_items(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => ["results", "data"]
            .into_iter()
            .find_map(|key| match map.remove(key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            }),
        _ => None,
    }
}

#[async_trait]
impl UpstreamProvider for HttpProvider {
    async fn fetch_match_details(&self, identifier: &str) -> Result<MatchRecord, UpstreamError> {
        let path = format!("matches/{identifier}");
        let body = self.get_json(&path).await?;
        if !body.is_object() {
            return Err(UpstreamError::Decode {
                url: self.url(&path),
                reason: "match details are not a JSON object".to_string(),
            });
        }
        Ok(MatchRecord::from_value(body))
    }

    async fn fetch_team_match_history(&self, team_id: i64) -> Result<Vec<MatchRecord>, UpstreamError> {
        let path = format!("teams/{team_id}/matches");
        let body = self.get_json(&path).await?;
        let items = history_items(body).ok_or_else(|| UpstreamError::Decode {
            url: self.url(&path),
            reason: "match history is not a list".to_string(),
        })?;
        Ok(items.into_iter().map(MatchRecord::from_value).collect())
    }

    async fn fetch_team_stats(&self, team_slug: &str) -> Result<TeamStats, UpstreamError> {
        let body = self.get_json(&format!("teams/{team_slug}/stats")).await?;
        Ok(TeamStats(body))
    }
}
