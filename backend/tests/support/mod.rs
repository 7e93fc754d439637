#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use zoo_backend::db::repositories::LocalRepository;
use zoo_backend::db::repository::FullRepository;
use zoo_backend::models::{
    ActivityPattern, Animal, DietaryClass, Enclosure, NewAnimal, NewEnclosure, SecurityLevel, Zoo,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Fresh, empty in-memory store behind the trait object handlers use.
pub fn local_repo() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

pub fn new_animal(name: &str, pattern: ActivityPattern, diet: DietaryClass) -> NewAnimal {
    NewAnimal::new(name)
        .with_activity_pattern(pattern)
        .with_diet(diet)
}

pub async fn insert_animal(
    repo: &dyn FullRepository,
    name: &str,
    pattern: ActivityPattern,
    diet: DietaryClass,
) -> Animal {
    repo.insert_animal(&new_animal(name, pattern, diet))
        .await
        .expect("insert animal")
}

pub async fn insert_enclosure(
    repo: &dyn FullRepository,
    name: &str,
    size: f64,
    security: SecurityLevel,
) -> Enclosure {
    repo.insert_enclosure(&NewEnclosure::new(name, size).with_security(security))
        .await
        .expect("insert enclosure")
}

pub async fn insert_zoo(repo: &dyn FullRepository, name: &str) -> Zoo {
    repo.insert_zoo(name).await.expect("insert zoo")
}
