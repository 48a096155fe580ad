//! Infrastructure Layer - External concerns and implementations
//!
//! This module handles the GitHub API and the repositories built on top of it.

pub mod api_clients;
pub mod repositories;

pub use api_clients::GitHubApiClient;
pub use repositories::*;
