//! Zoo repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Zoo, ZooId};

/// Repository trait for zoos. Returned records carry their derived animal
/// and enclosure ids.
#[async_trait]
pub trait ZooRepository: Send + Sync {
    async fn list_zoos(&self) -> RepositoryResult<Vec<Zoo>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the zoo doesn't exist
    async fn get_zoo(&self, id: ZooId) -> RepositoryResult<Zoo>;

    async fn insert_zoo(&self, name: &str) -> RepositoryResult<Zoo>;

    async fn rename_zoo(&self, id: ZooId, name: &str) -> RepositoryResult<Zoo>;

    /// Remove a zoo. Animals and enclosures are detached, not removed.
    async fn delete_zoo(&self, id: ZooId) -> RepositoryResult<bool>;
}
