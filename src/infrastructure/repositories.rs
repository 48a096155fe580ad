//! Repository implementations

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tracing::{debug, warn};

use super::api_clients::GitHubApiClient;
use crate::domain::{Owner, SearchError, SearchResponse, SearchResult};

/// Receiver for the callback form of a repository search
pub trait RepositoryCallback: Send + Sync {
    fn handle_github_response(&self, response: SearchResponse);
    fn handle_github_error(&self, error: SearchError);
}

/// Repository trait for repository search data access
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search_repository(&self, query: &str) -> Result<SearchResponse, SearchError>;

    /// Callback form of [`SearchRepository::search_repository`].
    ///
    /// Returns immediately; the outcome is reported to `callback` exactly once.
    fn search_repository_with_callback(&self, query: &str, callback: Arc<dyn RepositoryCallback>);
}

fn report(callback: &dyn RepositoryCallback, outcome: Result<SearchResponse, SearchError>) {
    match outcome {
        Ok(response) => callback.handle_github_response(response),
        Err(error) => callback.handle_github_error(error),
    }
}

/// Repository backed by the GitHub search API
pub struct GitHubRepository {
    client: Arc<GitHubApiClient>,
}

impl GitHubRepository {
    pub fn new(client: Arc<GitHubApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchRepository for GitHubRepository {
    async fn search_repository(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.client.search_repositories(query).await
    }

    /// Must be called from within a tokio runtime
    fn search_repository_with_callback(&self, query: &str, callback: Arc<dyn RepositoryCallback>) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "callback search requested outside of a tokio runtime");
                callback.handle_github_error(SearchError::Configuration(e.to_string()));
                return;
            }
        };

        let client = Arc::clone(&self.client);
        let query = query.to_string();
        handle.spawn(async move {
            let outcome = client.search_repositories(&query).await;
            report(callback.as_ref(), outcome);
        });
    }
}

/// Offline repository producing deterministic results derived from the query
pub struct FakeGitHubRepository {
    results_per_query: usize,
}

impl Default for FakeGitHubRepository {
    fn default() -> Self {
        Self::new(100)
    }
}

impl FakeGitHubRepository {
    pub fn new(results_per_query: usize) -> Self {
        Self { results_per_query }
    }

    fn generate(&self, query: &str) -> SearchResponse {
        let slug: String = query
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        // Fixed epoch so generated records compare equal across calls
        let epoch = Utc.timestamp_opt(1_577_836_800, 0).single();

        let items: Vec<SearchResult> = (0..self.results_per_query)
            .map(|i| {
                let owner = format!("owner{}", i % 10);
                let mut result = SearchResult::new(i as i64 + 1, format!("{owner}/{slug}-{i}"));
                result.description = Some(format!("Fake repository {i} matching \"{query}\""));
                result.html_url = Some(format!("https://github.com/{owner}/{slug}-{i}"));
                result.private = i % 7 == 0;
                result.updated_at = epoch.map(|t| t + Duration::days(i as i64));
                result.owner = Some(Owner {
                    login: Some(owner),
                    avatar_url: None,
                });
                result
            })
            .collect();

        SearchResponse::new(Some(items.len() as i64), Some(items))
    }
}

#[async_trait]
impl SearchRepository for FakeGitHubRepository {
    async fn search_repository(&self, query: &str) -> Result<SearchResponse, SearchError> {
        debug!(query, results = self.results_per_query, "fake search");
        Ok(self.generate(query))
    }

    fn search_repository_with_callback(&self, query: &str, callback: Arc<dyn RepositoryCallback>) {
        report(callback.as_ref(), Ok(self.generate(query)));
    }
}
