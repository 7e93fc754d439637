//! Persistence for the zoo records.
//!
//! Storage sits behind the repository traits so backends can be swapped:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Services (crate::services) - validation, actions       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - FullRepository       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  LocalRepository (in-memory) │  PostgresRepository (Diesel)
//!     └──────────────────────────────┘
//! ```
//!
//! - `repository`: trait definitions and [`RepositoryError`]
//! - `repositories::local`: in-memory implementation
//! - `repositories::postgres`: Postgres implementation (feature `postgres-repo`)
//! - `factory`: backend selection from config or environment
//! - `repo_config`: `repository.toml` parsing
//! - `seed`: reference data

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod seed;

// Without the feature the builder still carries an (always empty) slot.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryBuilder, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    AnimalRepository, CategoryRepository, EnclosureRepository, ErrorContext, FullRepository,
    RepositoryError, RepositoryResult, ZooRepository,
};
pub use seed::seed_if_empty;
