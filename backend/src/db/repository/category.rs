//! Category repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Category, CategoryId};

/// Repository trait for categories. Returned records carry their derived
/// `animal_ids`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the category doesn't exist
    async fn get_category(&self, id: CategoryId) -> RepositoryResult<Category>;

    async fn insert_category(&self, name: &str) -> RepositoryResult<Category>;

    async fn rename_category(&self, id: CategoryId, name: &str) -> RepositoryResult<Category>;

    /// Remove a category. Its animals stay, with their category cleared.
    async fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool>;
}
