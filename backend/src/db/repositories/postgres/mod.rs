//! Postgres repository implementation using Diesel.
//!
//! Tables: `categories`, `zoos`, `enclosures`, `animals` and the prey join
//! table `animal_prey`. Foreign keys on `animals` and `enclosures` are
//! `ON DELETE SET NULL`; prey edges cascade with either animal.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use log::{info, warn};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    AnimalRepository, CategoryRepository, EnclosureRepository, ErrorContext, RepositoryError,
    RepositoryResult, ZooRepository,
};
use crate::models::{
    Animal, AnimalAssignment, AnimalFilter, AnimalId, Category, CategoryId, Enclosure,
    EnclosureId, NewAnimal, NewEnclosure, Zoo, ZooId,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Pool and retry settings for [`PostgresRepository`].
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Extra attempts after a retryable failure.
    pub max_retries: u32,
    /// First backoff; doubled on every retry.
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

/// Parsed `key`, or `fallback` when unset or malformed.
fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(fallback)
}

impl PostgresConfig {
    /// `DATABASE_URL` (or `PG_DATABASE_URL`) plus the optional `PG_POOL_MAX`,
    /// `PG_POOL_MIN`, `PG_CONN_TIMEOUT_SEC`, `PG_IDLE_TIMEOUT_SEC`,
    /// `PG_MAX_RETRIES` and `PG_RETRY_DELAY_MS` overrides.
    pub fn from_env() -> RepositoryResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::configuration("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;
        let d = Self::default();

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", d.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", d.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", d.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", d.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", d.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", d.retry_delay_ms),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
///
/// Every call checks a connection out of the r2d2 pool on a blocking thread
/// and retries connection failures and serialization conflicts with
/// exponential backoff.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Build the pool and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            MigrationHarness::run_pending_migrations(&mut *conn, MIGRATIONS).map_err(|e| {
                RepositoryError::internal_with_context(
                    e.to_string(),
                    ErrorContext::new("run_migrations"),
                )
            })?;
        }
        info!("Postgres zoo schema is up to date");

        Ok(Self { pool, config })
    }

    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        task::spawn_blocking(move || {
            let mut attempt = 0;
            loop {
                let result = pool
                    .get()
                    .map_err(|e| {
                        RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        )
                    })
                    .and_then(|mut conn| f.clone()(&mut conn));

                match result {
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        warn!("Retrying after {} (attempt {})", e, attempt + 1);
                        std::thread::sleep(delay);
                        delay *= 2;
                        attempt += 1;
                    }
                    other => return other,
                }
            }
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(e.to_string(), ErrorContext::new("spawn_blocking"))
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn raw_ids<T: Copy + Into<i64>>(ids: &[T]) -> Vec<i64> {
    ids.iter().map(|id| (*id).into()).collect()
}

fn typed_ids<T: From<i64>>(ids: Vec<i64>) -> Vec<T> {
    ids.into_iter().map(T::from).collect()
}

/// Group `(member_id, owner_id)` pairs by owner, keeping member order.
fn group_by_owner(rows: Vec<(i64, Option<i64>)>) -> HashMap<i64, Vec<i64>> {
    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
    for (member, owner) in rows {
        if let Some(owner) = owner {
            grouped.entry(owner).or_default().push(member);
        }
    }
    grouped
}

fn prey_by_predator(
    conn: &mut PgConnection,
    predator_ids: &[i64],
) -> RepositoryResult<HashMap<i64, Vec<AnimalId>>> {
    let rows = animal_prey::table
        .filter(animal_prey::predator_id.eq_any(predator_ids))
        .order((animal_prey::predator_id.asc(), animal_prey::prey_id.asc()))
        .select(AnimalPreyRow::as_select())
        .load::<AnimalPreyRow>(conn)
        .map_err(map_diesel_error)?;

    let mut grouped: HashMap<i64, Vec<AnimalId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.predator_id)
            .or_default()
            .push(AnimalId(row.prey_id));
    }
    Ok(grouped)
}

fn hydrate_animals(conn: &mut PgConnection, rows: Vec<AnimalRow>) -> RepositoryResult<Vec<Animal>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut prey = prey_by_predator(conn, &ids)?;
    rows.into_iter()
        .map(|row| {
            let prey_ids = prey.remove(&row.id).unwrap_or_default();
            row.into_animal(prey_ids)
        })
        .collect()
}

fn load_animal(conn: &mut PgConnection, id: i64) -> RepositoryResult<Animal> {
    let row = animals::table
        .find(id)
        .select(AnimalRow::as_select())
        .first::<AnimalRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or_else(|| RepositoryError::missing("animal", id))?;
    let prey_ids = prey_by_predator(conn, &[id])?
        .remove(&id)
        .unwrap_or_default();
    row.into_animal(prey_ids)
}

fn replace_prey(
    conn: &mut PgConnection,
    predator_id: i64,
    prey_ids: &[AnimalId],
) -> RepositoryResult<()> {
    diesel::delete(animal_prey::table.filter(animal_prey::predator_id.eq(predator_id)))
        .execute(conn)
        .map_err(map_diesel_error)?;

    if prey_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<AnimalPreyRow> = prey_ids
        .iter()
        .map(|prey| AnimalPreyRow {
            predator_id,
            prey_id: prey.0,
        })
        .collect();
    diesel::insert_into(animal_prey::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(map_diesel_error)?;
    Ok(())
}

fn animal_ids_by_category(
    conn: &mut PgConnection,
    only: Option<i64>,
) -> RepositoryResult<HashMap<i64, Vec<i64>>> {
    let mut query = animals::table
        .filter(animals::category_id.is_not_null())
        .into_boxed();
    if let Some(id) = only {
        query = query.filter(animals::category_id.eq(id));
    }
    let rows = query
        .order(animals::id.asc())
        .select((animals::id, animals::category_id))
        .load::<(i64, Option<i64>)>(conn)
        .map_err(map_diesel_error)?;
    Ok(group_by_owner(rows))
}

fn animal_ids_by_enclosure(
    conn: &mut PgConnection,
    only: Option<&[i64]>,
) -> RepositoryResult<HashMap<i64, Vec<i64>>> {
    let mut query = animals::table
        .filter(animals::enclosure_id.is_not_null())
        .into_boxed();
    if let Some(ids) = only {
        query = query.filter(animals::enclosure_id.eq_any(ids));
    }
    let rows = query
        .order(animals::id.asc())
        .select((animals::id, animals::enclosure_id))
        .load::<(i64, Option<i64>)>(conn)
        .map_err(map_diesel_error)?;
    Ok(group_by_owner(rows))
}

fn members_by_zoo(
    conn: &mut PgConnection,
    only: Option<i64>,
) -> RepositoryResult<(HashMap<i64, Vec<i64>>, HashMap<i64, Vec<i64>>)> {
    let mut animal_query = animals::table
        .filter(animals::zoo_id.is_not_null())
        .into_boxed();
    let mut enclosure_query = enclosures::table
        .filter(enclosures::zoo_id.is_not_null())
        .into_boxed();
    if let Some(id) = only {
        animal_query = animal_query.filter(animals::zoo_id.eq(id));
        enclosure_query = enclosure_query.filter(enclosures::zoo_id.eq(id));
    }

    let animal_rows = animal_query
        .order(animals::id.asc())
        .select((animals::id, animals::zoo_id))
        .load::<(i64, Option<i64>)>(conn)
        .map_err(map_diesel_error)?;
    let enclosure_rows = enclosure_query
        .order(enclosures::id.asc())
        .select((enclosures::id, enclosures::zoo_id))
        .load::<(i64, Option<i64>)>(conn)
        .map_err(map_diesel_error)?;

    Ok((group_by_owner(animal_rows), group_by_owner(enclosure_rows)))
}

fn hydrate_enclosures(
    conn: &mut PgConnection,
    rows: Vec<EnclosureRow>,
) -> RepositoryResult<Vec<Enclosure>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut occupants = animal_ids_by_enclosure(conn, Some(&ids))?;
    rows.into_iter()
        .map(|row| {
            let animal_ids = typed_ids(occupants.remove(&row.id).unwrap_or_default());
            row.into_enclosure(animal_ids)
        })
        .collect()
}

fn load_enclosure(conn: &mut PgConnection, id: i64) -> RepositoryResult<Enclosure> {
    let row = enclosures::table
        .find(id)
        .select(EnclosureRow::as_select())
        .first::<EnclosureRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or_else(|| RepositoryError::missing("enclosure", id))?;
    hydrate_enclosures(conn, vec![row])?
        .pop()
        .ok_or_else(|| RepositoryError::missing("enclosure", id))
}

fn category_from_row(row: CategoryRow, members: &mut HashMap<i64, Vec<i64>>) -> Category {
    Category {
        id: CategoryId(row.id),
        animal_ids: typed_ids(members.remove(&row.id).unwrap_or_default()),
        name: row.name,
    }
}

fn zoo_from_row(
    row: ZooRow,
    animals_by_zoo: &mut HashMap<i64, Vec<i64>>,
    enclosures_by_zoo: &mut HashMap<i64, Vec<i64>>,
) -> Zoo {
    Zoo {
        id: ZooId(row.id),
        animal_ids: typed_ids(animals_by_zoo.remove(&row.id).unwrap_or_default()),
        enclosure_ids: typed_ids(enclosures_by_zoo.remove(&row.id).unwrap_or_default()),
        name: row.name,
    }
}

fn load_category(conn: &mut PgConnection, id: i64) -> RepositoryResult<Category> {
    let row = categories::table
        .find(id)
        .select(CategoryRow::as_select())
        .first::<CategoryRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or_else(|| RepositoryError::missing("category", id))?;
    let mut members = animal_ids_by_category(conn, Some(id))?;
    Ok(category_from_row(row, &mut members))
}

fn load_zoo(conn: &mut PgConnection, id: i64) -> RepositoryResult<Zoo> {
    let row = zoos::table
        .find(id)
        .select(ZooRow::as_select())
        .first::<ZooRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or_else(|| RepositoryError::missing("zoo", id))?;
    let (mut animal_members, mut enclosure_members) = members_by_zoo(conn, Some(id))?;
    Ok(zoo_from_row(row, &mut animal_members, &mut enclosure_members))
}

#[async_trait]
impl AnimalRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_animals(&self) -> RepositoryResult<Vec<Animal>> {
        self.with_conn(|conn| {
            let rows = animals::table
                .order(animals::id.asc())
                .select(AnimalRow::as_select())
                .load::<AnimalRow>(conn)
                .map_err(map_diesel_error)?;
            hydrate_animals(conn, rows)
        })
        .await
    }

    async fn get_animal(&self, id: AnimalId) -> RepositoryResult<Animal> {
        self.with_conn(move |conn| load_animal(conn, id.0)).await
    }

    async fn get_animals(&self, ids: &[AnimalId]) -> RepositoryResult<Vec<Animal>> {
        let ids = raw_ids(ids);
        self.with_conn(move |conn| {
            let rows = animals::table
                .filter(animals::id.eq_any(&ids))
                .order(animals::id.asc())
                .select(AnimalRow::as_select())
                .load::<AnimalRow>(conn)
                .map_err(map_diesel_error)?;
            hydrate_animals(conn, rows)
        })
        .await
    }

    async fn find_animals(&self, filter: AnimalFilter) -> RepositoryResult<Vec<Animal>> {
        self.with_conn(move |conn| {
            let mut query = animals::table.into_boxed();
            if let Some(id) = filter.category_id {
                query = query.filter(animals::category_id.eq(id.0));
            }
            if let Some(id) = filter.enclosure_id {
                query = query.filter(animals::enclosure_id.eq(id.0));
            }
            if let Some(id) = filter.zoo_id {
                query = query.filter(animals::zoo_id.eq(id.0));
            }

            let rows = query
                .order(animals::id.asc())
                .select(AnimalRow::as_select())
                .load::<AnimalRow>(conn)
                .map_err(map_diesel_error)?;
            hydrate_animals(conn, rows)
        })
        .await
    }

    async fn insert_animal(&self, animal: &NewAnimal) -> RepositoryResult<Animal> {
        let animal = animal.clone();
        self.with_conn(move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let row: AnimalRow = diesel::insert_into(animals::table)
                    .values(&NewAnimalRow::from(&animal))
                    .returning(AnimalRow::as_returning())
                    .get_result(tx)
                    .map_err(map_diesel_error)?;
                replace_prey(tx, row.id, &animal.prey_ids)?;
                load_animal(tx, row.id)
            })
        })
        .await
    }

    async fn update_animal(&self, id: AnimalId, animal: &NewAnimal) -> RepositoryResult<Animal> {
        let animal = animal.clone();
        self.with_conn(move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let updated = diesel::update(animals::table.find(id.0))
                    .set(&AnimalChangeset::from(&animal))
                    .execute(tx)
                    .map_err(map_diesel_error)?;
                if updated == 0 {
                    return Err(RepositoryError::missing("animal", id));
                }
                if let Some(zoo_id) = animal.zoo_id {
                    diesel::update(animals::table.find(id.0))
                        .set(animals::zoo_id.eq(zoo_id.0))
                        .execute(tx)
                        .map_err(map_diesel_error)?;
                }
                replace_prey(tx, id.0, &animal.prey_ids)?;
                load_animal(tx, id.0)
            })
        })
        .await
    }

    async fn delete_animal(&self, id: AnimalId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(animals::table.find(id.0))
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn delete_animals(&self, ids: &[AnimalId]) -> RepositoryResult<usize> {
        let ids = raw_ids(ids);
        self.with_conn(move |conn| {
            diesel::delete(animals::table.filter(animals::id.eq_any(&ids)))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn assign_animals(
        &self,
        ids: &[AnimalId],
        assignment: AnimalAssignment,
    ) -> RepositoryResult<usize> {
        let ids = raw_ids(ids);
        self.with_conn(move |conn| {
            let target = animals::table.filter(animals::id.eq_any(&ids));
            let touched = match assignment {
                AnimalAssignment::Category(category) => diesel::update(target)
                    .set(animals::category_id.eq(category.map(i64::from)))
                    .execute(conn),
                AnimalAssignment::Enclosure(enclosure) => diesel::update(target)
                    .set(animals::enclosure_id.eq(enclosure.map(i64::from)))
                    .execute(conn),
                AnimalAssignment::Zoo(zoo) => diesel::update(target)
                    .set(animals::zoo_id.eq(zoo.map(i64::from)))
                    .execute(conn),
            };
            touched.map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl CategoryRepository for PostgresRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.with_conn(|conn| {
            let rows = categories::table
                .order(categories::id.asc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(conn)
                .map_err(map_diesel_error)?;
            let mut members = animal_ids_by_category(conn, None)?;
            Ok(rows
                .into_iter()
                .map(|row| category_from_row(row, &mut members))
                .collect())
        })
        .await
    }

    async fn get_category(&self, id: CategoryId) -> RepositoryResult<Category> {
        self.with_conn(move |conn| load_category(conn, id.0)).await
    }

    async fn insert_category(&self, name: &str) -> RepositoryResult<Category> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row: CategoryRow = diesel::insert_into(categories::table)
                .values(categories::name.eq(&name))
                .returning(CategoryRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            Ok(category_from_row(row, &mut HashMap::new()))
        })
        .await
    }

    async fn rename_category(&self, id: CategoryId, name: &str) -> RepositoryResult<Category> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let updated = diesel::update(categories::table.find(id.0))
                .set(categories::name.eq(&name))
                .execute(conn)
                .map_err(map_diesel_error)?;
            if updated == 0 {
                return Err(RepositoryError::missing("category", id));
            }
            load_category(conn, id.0)
        })
        .await
    }

    async fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(categories::table.find(id.0))
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl EnclosureRepository for PostgresRepository {
    async fn list_enclosures(&self) -> RepositoryResult<Vec<Enclosure>> {
        self.with_conn(|conn| {
            let rows = enclosures::table
                .order(enclosures::id.asc())
                .select(EnclosureRow::as_select())
                .load::<EnclosureRow>(conn)
                .map_err(map_diesel_error)?;
            hydrate_enclosures(conn, rows)
        })
        .await
    }

    async fn get_enclosure(&self, id: EnclosureId) -> RepositoryResult<Enclosure> {
        self.with_conn(move |conn| load_enclosure(conn, id.0)).await
    }

    async fn list_zoo_enclosures(&self, zoo_id: ZooId) -> RepositoryResult<Vec<Enclosure>> {
        self.with_conn(move |conn| {
            let rows = enclosures::table
                .filter(enclosures::zoo_id.eq(zoo_id.0))
                .order(enclosures::id.asc())
                .select(EnclosureRow::as_select())
                .load::<EnclosureRow>(conn)
                .map_err(map_diesel_error)?;
            hydrate_enclosures(conn, rows)
        })
        .await
    }

    async fn find_enclosure_by_name(
        &self,
        name: &str,
        except: Option<EnclosureId>,
    ) -> RepositoryResult<Option<Enclosure>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let mut query = enclosures::table
                .filter(enclosures::name.eq(&name))
                .into_boxed();
            if let Some(except) = except {
                query = query.filter(enclosures::id.ne(except.0));
            }
            let row = query
                .order(enclosures::id.asc())
                .select(EnclosureRow::as_select())
                .first::<EnclosureRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            match row {
                Some(row) => Ok(hydrate_enclosures(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
        .await
    }

    async fn insert_enclosure(&self, enclosure: &NewEnclosure) -> RepositoryResult<Enclosure> {
        let values = EnclosureValues::from(enclosure);
        self.with_conn(move |conn| {
            let row: EnclosureRow = diesel::insert_into(enclosures::table)
                .values(&values)
                .returning(EnclosureRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            row.into_enclosure(Vec::new())
        })
        .await
    }

    async fn update_enclosure(
        &self,
        id: EnclosureId,
        enclosure: &NewEnclosure,
    ) -> RepositoryResult<Enclosure> {
        let values = EnclosureValues::from(enclosure);
        self.with_conn(move |conn| {
            let updated = diesel::update(enclosures::table.find(id.0))
                .set(&values)
                .execute(conn)
                .map_err(map_diesel_error)?;
            if updated == 0 {
                return Err(RepositoryError::missing("enclosure", id));
            }
            load_enclosure(conn, id.0)
        })
        .await
    }

    async fn delete_enclosure(&self, id: EnclosureId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(enclosures::table.find(id.0))
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn assign_enclosures_to_zoo(
        &self,
        ids: &[EnclosureId],
        zoo_id: Option<ZooId>,
    ) -> RepositoryResult<usize> {
        let ids = raw_ids(ids);
        self.with_conn(move |conn| {
            diesel::update(enclosures::table.filter(enclosures::id.eq_any(&ids)))
                .set(enclosures::zoo_id.eq(zoo_id.map(i64::from)))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl ZooRepository for PostgresRepository {
    async fn list_zoos(&self) -> RepositoryResult<Vec<Zoo>> {
        self.with_conn(|conn| {
            let rows = zoos::table
                .order(zoos::id.asc())
                .select(ZooRow::as_select())
                .load::<ZooRow>(conn)
                .map_err(map_diesel_error)?;
            let (mut animal_members, mut enclosure_members) = members_by_zoo(conn, None)?;
            Ok(rows
                .into_iter()
                .map(|row| zoo_from_row(row, &mut animal_members, &mut enclosure_members))
                .collect())
        })
        .await
    }

    async fn get_zoo(&self, id: ZooId) -> RepositoryResult<Zoo> {
        self.with_conn(move |conn| load_zoo(conn, id.0)).await
    }

    async fn insert_zoo(&self, name: &str) -> RepositoryResult<Zoo> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row: ZooRow = diesel::insert_into(zoos::table)
                .values(zoos::name.eq(&name))
                .returning(ZooRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            Ok(zoo_from_row(row, &mut HashMap::new(), &mut HashMap::new()))
        })
        .await
    }

    async fn rename_zoo(&self, id: ZooId, name: &str) -> RepositoryResult<Zoo> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let updated = diesel::update(zoos::table.find(id.0))
                .set(zoos::name.eq(&name))
                .execute(conn)
                .map_err(map_diesel_error)?;
            if updated == 0 {
                return Err(RepositoryError::missing("zoo", id));
            }
            load_zoo(conn, id.0)
        })
        .await
    }

    async fn delete_zoo(&self, id: ZooId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(zoos::table.find(id.0))
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(deleted > 0)
        })
        .await
    }
}
