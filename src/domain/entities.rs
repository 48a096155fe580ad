//! Domain entities representing repository search results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one repository search.
///
/// Both fields are optional: the upstream API or deserialization may omit
/// them, and consumers decide what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(default)]
    pub items: Option<Vec<SearchResult>>,
}

impl SearchResponse {
    pub fn new(total_count: Option<i64>, items: Option<Vec<SearchResult>>) -> Self {
        Self { total_count, items }
    }

    /// Returns the count and items when both are present
    pub fn complete(&self) -> Option<(i64, &[SearchResult])> {
        match (self.total_count, self.items.as_deref()) {
            (Some(count), Some(items)) => Some((count, items)),
            _ => None,
        }
    }
}

/// A single repository record as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl SearchResult {
    /// Create a record with only the identifying fields set
    pub fn new(id: i64, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit_once('/')
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| full_name.clone());

        Self {
            id,
            name: Some(name),
            full_name: Some(full_name),
            private: false,
            description: None,
            html_url: None,
            updated_at: None,
            owner: None,
        }
    }

    /// Best available display label: full name, then name, then the id
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Owner of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_requires_both_fields() {
        assert!(SearchResponse::new(Some(1), Some(vec![])).complete().is_some());
        assert!(SearchResponse::new(None, Some(vec![])).complete().is_none());
        assert!(SearchResponse::new(Some(1), None).complete().is_none());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let response: SearchResponse = serde_json::from_str(r#"{"incomplete_results": false}"#)
            .expect("valid json");
        assert_eq!(response, SearchResponse::new(None, None));
    }

    #[test]
    fn search_result_reads_github_payload() {
        let json = r#"{
            "id": 42,
            "name": "tokio",
            "full_name": "tokio-rs/tokio",
            "private": false,
            "description": "A runtime for writing reliable asynchronous applications",
            "html_url": "https://github.com/tokio-rs/tokio",
            "updated_at": "2024-05-01T12:00:00Z",
            "owner": { "login": "tokio-rs", "avatar_url": "https://avatars.example/1" },
            "stargazers_count": 25000
        }"#;
        let result: SearchResult = serde_json::from_str(json).expect("valid json");
        assert_eq!(result.id, 42);
        assert_eq!(result.display_name(), "tokio-rs/tokio");
        assert_eq!(
            result.owner.and_then(|o| o.login).as_deref(),
            Some("tokio-rs")
        );
        assert!(result.updated_at.is_some());
    }

    #[test]
    fn new_derives_name_from_full_name() {
        let result = SearchResult::new(7, "rust-lang/rust");
        assert_eq!(result.name.as_deref(), Some("rust"));

        let bare = SearchResult::new(8, "standalone");
        assert_eq!(bare.name.as_deref(), Some("standalone"));
    }
}
