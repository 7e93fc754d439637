//! `repository.toml`: which store backs the zoo and how to reach it.
//!
//! ```toml
//! [repository]
//! type = "postgres"   # or "local"
//! seed = true
//!
//! [postgres]
//! database_url = "postgres://zoo@localhost/zoo"
//! max_connections = 20
//! ```
//!
//! Unset `[postgres]` keys keep the pool defaults. The same file may carry a
//! `[policy]` section, read by [`crate::config::PolicyConfig`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::factory::RepositoryType;
use super::repository::{RepositoryError, RepositoryResult};

/// Searched in order by [`RepositoryConfig::default_path`].
const SEARCH_PATHS: [&str; 3] = [
    "repository.toml",
    "backend/repository.toml",
    "../repository.toml",
];

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    pub repository: StoreSection,
    #[serde(default)]
    pub postgres: PostgresSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    #[serde(rename = "type")]
    pub backend: RepositoryType,
    /// Load the reference animals, categories and enclosures into an empty
    /// store at startup.
    #[serde(default)]
    pub seed: bool,
}

/// Pool overrides; `None` keeps the default of `PostgresConfig`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostgresSection {
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout: Option<u64>,
    pub idle_timeout: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl RepositoryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> RepositoryResult<Self> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository.toml: {}", e))
        })
    }

    /// First `repository.toml` that exists in the search paths.
    pub fn default_path() -> Option<PathBuf> {
        SEARCH_PATHS
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// The file's `seed` flag, or `ZOO_SEED=1`.
    pub fn seed_requested(&self) -> bool {
        self.repository.seed || super::seed::seed_requested_by_env()
    }

    /// Pool settings for the Postgres backend. A database URL is required.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(&self) -> RepositoryResult<super::PostgresConfig> {
        let section = &self.postgres;
        let database_url = section
            .database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                RepositoryError::configuration("[postgres] database_url is required")
            })?;

        let mut config = super::PostgresConfig::with_url(database_url);
        if let Some(v) = section.max_connections {
            config.max_pool_size = v;
        }
        if let Some(v) = section.min_connections {
            config.min_pool_size = v;
        }
        if let Some(v) = section.connect_timeout {
            config.connection_timeout_sec = v;
        }
        if let Some(v) = section.idle_timeout {
            config.idle_timeout_sec = v;
        }
        if let Some(v) = section.max_retries {
            config.max_retries = v;
        }
        if let Some(v) = section.retry_delay_ms {
            config.retry_delay_ms = v;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_store_with_policy_section() {
        let config = RepositoryConfig::from_toml_str(
            r#"
[repository]
type = "local"
seed = true

[policy]
category_delete = "set-null"
"#,
        )
        .unwrap();

        assert_eq!(config.repository.backend, RepositoryType::Local);
        assert!(config.seed_requested());
        assert!(config.postgres.database_url.is_none());
    }

    #[test]
    fn test_unknown_backend_is_configuration_error() {
        let err = RepositoryConfig::from_toml_str("[repository]\ntype = \"mongo\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_pg_alias() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"pg\"\n").unwrap();
        assert_eq!(config.repository.backend, RepositoryType::Postgres);
    }

    #[cfg(feature = "postgres-repo")]
    #[test]
    fn test_postgres_section_overrides_defaults() {
        let config = RepositoryConfig::from_toml_str(
            r#"
[repository]
type = "postgres"

[postgres]
database_url = "postgres://zoo@db:5432/zoo"
max_connections = 20
retry_delay_ms = 250
"#,
        )
        .unwrap();

        let pg = config.postgres_config().unwrap();
        assert_eq!(pg.database_url, "postgres://zoo@db:5432/zoo");
        assert_eq!(pg.max_pool_size, 20);
        assert_eq!(pg.retry_delay_ms, 250);
        assert_eq!(pg.min_pool_size, 1);
        assert_eq!(pg.max_retries, 3);
    }

    #[cfg(feature = "postgres-repo")]
    #[test]
    fn test_postgres_needs_database_url() {
        let config = RepositoryConfig::from_toml_str(
            "[repository]\ntype = \"postgres\"\n\n[postgres]\ndatabase_url = \"\"\n",
        )
        .unwrap();
        assert!(config.postgres_config().is_err());
    }
}
