//! Opening the store the server runs on.
//!
//! [`RepositoryBuilder`] picks the backend from `repository.toml` or the
//! environment, opens it, seeds it when asked and hands it out as the
//! `Arc<dyn FullRepository>` that `AppState` carries.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::seed;
use super::PostgresConfig;

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// Diesel over Postgres (feature `postgres-repo`)
    #[serde(alias = "pg")]
    Postgres,
    /// In-memory, lost on restart
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            other => Err(format!("Unknown repository type: {}", other)),
        }
    }
}

impl RepositoryType {
    /// `REPOSITORY_TYPE` if it parses; otherwise Postgres when a database URL
    /// is set, else Local.
    pub fn from_env() -> Self {
        if let Some(parsed) = std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            return parsed;
        }
        let has_url = ["DATABASE_URL", "PG_DATABASE_URL"]
            .iter()
            .any(|key| std::env::var(key).is_ok());
        if has_url {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Collects the backend choice and seeding flag, then opens the store.
///
/// ```ignore
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .seed(true)
///     .build()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    backend: RepositoryType,
    seed: bool,
    postgres: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Backend from [`RepositoryType::from_env`], seeding from `ZOO_SEED`.
    pub fn new() -> Self {
        Self {
            backend: RepositoryType::from_env(),
            seed: seed::seed_requested_by_env(),
            postgres: None,
        }
    }

    pub fn repository_type(mut self, backend: RepositoryType) -> Self {
        self.backend = backend;
        self
    }

    pub fn seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres = Some(config);
        self
    }

    /// Re-read the backend and, for Postgres, the `DATABASE_URL`/`PG_*`
    /// variables.
    pub fn from_env(mut self) -> RepositoryResult<Self> {
        self.backend = RepositoryType::from_env();
        #[cfg(feature = "postgres-repo")]
        if self.backend == RepositoryType::Postgres {
            self.postgres = Some(PostgresConfig::from_env()?);
        }
        Ok(self)
    }

    pub fn from_config_file<P: AsRef<Path>>(self, path: P) -> RepositoryResult<Self> {
        let config = RepositoryConfig::from_file(path)?;
        self.from_repository_config(&config)
    }

    pub fn from_repository_config(mut self, config: &RepositoryConfig) -> RepositoryResult<Self> {
        self.backend = config.repository.backend;
        self.seed = config.seed_requested();
        #[cfg(feature = "postgres-repo")]
        if self.backend == RepositoryType::Postgres {
            self.postgres = Some(config.postgres_config()?);
        }
        Ok(self)
    }

    /// Open the store, seeding it first if asked and it is empty.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo: Arc<dyn FullRepository> = match self.backend {
            RepositoryType::Local => Arc::new(LocalRepository::new()),
            RepositoryType::Postgres => open_postgres(self.postgres).await?,
        };
        info!("Opened {:?} repository", self.backend);

        if self.seed {
            seed::seed_if_empty(repo.as_ref()).await?;
        }
        Ok(repo)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "postgres-repo")]
async fn open_postgres(config: Option<PostgresConfig>) -> RepositoryResult<Arc<dyn FullRepository>> {
    use super::repositories::PostgresRepository;

    let config = config.ok_or_else(|| {
        RepositoryError::configuration("Postgres backend selected without connection settings")
    })?;
    // Pool creation and migrations block.
    let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "postgres-repo"))]
async fn open_postgres(_config: Option<PostgresConfig>) -> RepositoryResult<Arc<dyn FullRepository>> {
    Err(RepositoryError::configuration(
        "Postgres backend needs the postgres-repo feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_seeds_local_repository() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .seed(true)
            .build()
            .await
            .unwrap();

        assert_eq!(repo.list_categories().await.unwrap().len(), 3);
        assert_eq!(repo.list_animals().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_builder_without_seed_is_empty() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .seed(false)
            .build()
            .await
            .unwrap();

        assert!(repo.list_categories().await.unwrap().is_empty());
    }
}
