//! Enclosure repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Enclosure, EnclosureId, NewEnclosure, ZooId};

/// Repository trait for enclosures. Returned records carry their derived
/// `animal_ids`.
#[async_trait]
pub trait EnclosureRepository: Send + Sync {
    /// All enclosures ordered by id.
    async fn list_enclosures(&self) -> RepositoryResult<Vec<Enclosure>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the enclosure doesn't exist
    async fn get_enclosure(&self, id: EnclosureId) -> RepositoryResult<Enclosure>;

    /// Enclosures of one zoo ordered by id.
    async fn list_zoo_enclosures(&self, zoo_id: ZooId) -> RepositoryResult<Vec<Enclosure>>;

    /// Lowest-id enclosure with exactly this name, skipping `except`.
    async fn find_enclosure_by_name(
        &self,
        name: &str,
        except: Option<EnclosureId>,
    ) -> RepositoryResult<Option<Enclosure>>;

    /// Store a new enclosure. `animal_ids` on the input is ignored here.
    async fn insert_enclosure(&self, enclosure: &NewEnclosure) -> RepositoryResult<Enclosure>;

    async fn update_enclosure(
        &self,
        id: EnclosureId,
        enclosure: &NewEnclosure,
    ) -> RepositoryResult<Enclosure>;

    /// Remove an enclosure. Occupants stay, with their enclosure cleared.
    async fn delete_enclosure(&self, id: EnclosureId) -> RepositoryResult<bool>;

    /// Set the zoo of every enclosure in `ids`. Returns how many rows were
    /// touched.
    async fn assign_enclosures_to_zoo(
        &self,
        ids: &[EnclosureId],
        zoo_id: Option<ZooId>,
    ) -> RepositoryResult<usize>;
}
