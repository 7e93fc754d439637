//! Animal repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Animal, AnimalAssignment, AnimalFilter, AnimalId, NewAnimal};

/// Repository trait for animals.
///
/// Also owns the connection health check, since every backend stores animals.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Reads ====================

    /// All animals ordered by id.
    async fn list_animals(&self) -> RepositoryResult<Vec<Animal>>;

    /// Fetch one animal.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the animal doesn't exist
    async fn get_animal(&self, id: AnimalId) -> RepositoryResult<Animal>;

    /// Fetch the animals among `ids` that exist, ordered by id. Unknown ids
    /// are skipped.
    async fn get_animals(&self, ids: &[AnimalId]) -> RepositoryResult<Vec<Animal>>;

    /// Animals matching every key set on `filter`, ordered by id.
    async fn find_animals(&self, filter: AnimalFilter) -> RepositoryResult<Vec<Animal>>;

    // ==================== Writes ====================

    /// Store a new animal and return it with its assigned id.
    async fn insert_animal(&self, animal: &NewAnimal) -> RepositoryResult<Animal>;

    /// Overwrite an animal with `animal` (see [`Animal::apply_update`]).
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the animal doesn't exist
    async fn update_animal(&self, id: AnimalId, animal: &NewAnimal) -> RepositoryResult<Animal>;

    /// Remove an animal and every prey edge pointing at it.
    ///
    /// # Returns
    /// * `Ok(true)` if a row was removed, `Ok(false)` if it did not exist
    async fn delete_animal(&self, id: AnimalId) -> RepositoryResult<bool>;

    /// Remove several animals at once. Returns how many existed.
    async fn delete_animals(&self, ids: &[AnimalId]) -> RepositoryResult<usize>;

    /// Set one foreign key on every animal in `ids`. Returns how many rows
    /// were touched.
    async fn assign_animals(
        &self,
        ids: &[AnimalId],
        assignment: AnimalAssignment,
    ) -> RepositoryResult<usize>;
}
