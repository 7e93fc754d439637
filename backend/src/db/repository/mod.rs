//! Repository trait definitions for zoo persistence.
//!
//! One focused trait per entity; a backend implements all four and picks up
//! [`FullRepository`] through the blanket implementation.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`animal`]: Animals, their foreign keys and the prey graph
//! - [`category`]: Categories
//! - [`enclosure`]: Enclosures
//! - [`zoo`]: Zoos
//!
//! # Relations
//!
//! Foreign keys live on the child rows. Removing a parent never removes a
//! child at this level: deleting a category, enclosure or zoo clears the
//! matching key on its members. Cascading deletes are a service decision.

pub mod animal;
pub mod category;
pub mod enclosure;
pub mod error;
pub mod zoo;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use animal::AnimalRepository;
pub use category::CategoryRepository;
pub use enclosure::EnclosureRepository;
pub use zoo::ZooRepository;

/// Composite trait bound for a complete repository implementation.
///
/// ```ignore
/// async fn occupants<R: FullRepository + ?Sized>(
///     repo: &R,
///     enclosure_id: EnclosureId,
/// ) -> RepositoryResult<Vec<Animal>> {
///     repo.get_enclosure(enclosure_id).await?;
///     repo.find_animals(AnimalFilter::enclosure(enclosure_id)).await
/// }
/// ```
pub trait FullRepository:
    AnimalRepository + CategoryRepository + EnclosureRepository + ZooRepository
{
}

impl<T> FullRepository for T where
    T: AnimalRepository + CategoryRepository + EnclosureRepository + ZooRepository
{
}
