//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub github: GitHubConfig,
    pub fake: FakeRepositoryConfig,
    pub logging: LoggingConfig,
}

/// GitHub REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub base_url: String,
    /// Personal access token. Unauthenticated search is allowed but heavily rate limited.
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Offline repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeRepositoryConfig {
    pub results_per_query: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig {
                base_url: "https://api.github.com".to_string(),
                token: None,
                timeout_seconds: 30,
                user_agent: format!("github-search/{}", env!("CARGO_PKG_VERSION")),
            },
            fake: FakeRepositoryConfig {
                results_per_query: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "plain".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = Self::defaults_builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Override with environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix("GITHUB_SEARCH").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single explicit file layered over the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::defaults_builder()?
            .add_source(config::File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()
    }

    fn defaults_builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let defaults = config::Config::try_from(&Config::default())?;
        Ok(config::Config::builder().add_source(defaults))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_public_github() {
        let config = Config::default();
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert!(config.github.token.is_none());
        assert_eq!(config.fake.results_per_query, 100);
    }

    #[test]
    fn load_from_overrides_only_given_keys() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[github]\nbase_url = \"http://localhost:9999\"\ntimeout_seconds = 5\n\n[logging]\nformat = \"json\""
        )
        .expect("write config");

        let config = Config::load_from(file.path()).expect("config loads");
        assert_eq!(config.github.base_url, "http://localhost:9999");
        assert_eq!(config.github.timeout_seconds, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.fake.results_per_query, 100);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = Config::load_from(dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
