//! GitHub REST API client for repository search

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::GitHubConfig;
use crate::domain::{SearchError, SearchResponse};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Error payload returned by the GitHub API on non-success statuses
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: Option<String>,
}

/// Client for the GitHub repository search endpoint
pub struct GitHubApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubApiClient {
    /// Create a new client against `base_url`
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SearchError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Create a client from the `[github]` configuration section
    pub fn from_config(config: &GitHubConfig) -> Result<Self, SearchError> {
        Self::new(
            config.base_url.clone(),
            config.token.clone(),
            Duration::from_secs(config.timeout_seconds),
            &config.user_agent,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search public repositories matching `query`
    #[instrument(skip(self))]
    pub async fn search_repositories(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let url = format!("{}/search/repositories", self.base_url);
        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, GITHUB_JSON)
            .query(&[("q", query)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
                || (status == StatusCode::FORBIDDEN
                    && response
                        .headers()
                        .get("x-ratelimit-remaining")
                        .and_then(|v| v.to_str().ok())
                        == Some("0"));
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GitHubErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);

            if rate_limited {
                warn!(status = status.as_u16(), %message, "GitHub search rate limited");
                return Err(SearchError::RateLimited { message });
            }
            debug!(status = status.as_u16(), %message, "GitHub search failed");
            return Err(SearchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let search_response: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        debug!(
            total_count = ?search_response.total_count,
            items = ?search_response.items.as_ref().map(Vec::len),
            "GitHub search completed"
        );
        Ok(search_response)
    }
}
