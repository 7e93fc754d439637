//! Backend selection and opening the store.

mod support;

use std::str::FromStr;
use zoo_backend::db::factory::{RepositoryBuilder, RepositoryType};

#[test]
fn test_repository_type_from_str_postgres() {
    let rt = RepositoryType::from_str("postgres").unwrap();
    assert_eq!(rt, RepositoryType::Postgres);

    let rt = RepositoryType::from_str("POSTGRES").unwrap();
    assert_eq!(rt, RepositoryType::Postgres);

    let rt = RepositoryType::from_str("pg").unwrap();
    assert_eq!(rt, RepositoryType::Postgres);
}

#[test]
fn test_repository_type_from_str_local() {
    let rt = RepositoryType::from_str("local").unwrap();
    assert_eq!(rt, RepositoryType::Local);

    let rt = RepositoryType::from_str("LOCAL").unwrap();
    assert_eq!(rt, RepositoryType::Local);
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("invalid");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let rt = RepositoryType::from_env();
            assert_eq!(rt, RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/test")),
        ],
        || {
            let rt = RepositoryType::from_env();
            assert_eq!(rt, RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_from_env_with_pg_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/test")),
        ],
        || {
            let rt = RepositoryType::from_env();
            assert_eq!(rt, RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_from_env_explicit() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        let rt = RepositoryType::from_env();
        assert_eq!(rt, RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_explicit_postgres() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("postgres"))], || {
        let rt = RepositoryType::from_env();
        assert_eq!(rt, RepositoryType::Postgres);
    });
}

#[test]
fn test_repository_type_from_env_invalid_defaults_to_local() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("invalid")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let rt = RepositoryType::from_env();
            assert_eq!(rt, RepositoryType::Local);
        },
    );
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_postgres_without_settings_fails() {
    let err = RepositoryBuilder::new()
        .repository_type(RepositoryType::Postgres)
        .seed(false)
        .build()
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("without connection settings"));
}

#[cfg(feature = "postgres-repo")]
#[test]
fn test_from_env_postgres_needs_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("postgres")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let err = RepositoryBuilder::new().from_env().err().unwrap();
            assert!(err.to_string().starts_with("Configuration error"));
        },
    );
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_postgres_without_feature_fails() {
    let err = RepositoryBuilder::new()
        .repository_type(RepositoryType::Postgres)
        .build()
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("postgres-repo feature"));
}

#[tokio::test]
async fn test_builder_seeds_when_env_asks() {
    let builder = support::with_scoped_env(
        &[("ZOO_SEED", Some("true")), ("REPOSITORY_TYPE", Some("local"))],
        RepositoryBuilder::new,
    );
    let repo = builder.build().await.unwrap();

    let animals = repo.list_animals().await.unwrap();
    let names: Vec<&str> = animals.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Lion", "Eagle", "Python"]);
    assert!(animals.iter().all(|a| a.enclosure_id.is_some()));
}

#[tokio::test]
async fn test_builder_explicit_seed_off_overrides_env() {
    let builder = support::with_scoped_env(&[("ZOO_SEED", Some("1"))], || {
        RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .seed(false)
    });
    let repo = builder.build().await.unwrap();
    assert!(repo.list_animals().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_builder_from_env_local() {
    let builder = support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("ZOO_SEED", None),
        ],
        || RepositoryBuilder::new().from_env(),
    );
    let repo = builder.unwrap().build().await.unwrap();
    assert!(repo.health_check().await.unwrap());
}
