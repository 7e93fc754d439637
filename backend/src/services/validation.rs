//! Input checks shared by the services.
//!
//! Every referenced id must resolve to a stored record; a dangling reference
//! is a validation error rather than a silent no-op.

use std::collections::BTreeSet;

use super::error::{ServiceError, ServiceResult};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{
    Animal, AnimalId, CategoryId, Enclosure, EnclosureId, NewAnimal, NewEnclosure, ZooId,
};

/// Turn a repository NotFound into a validation error about a reference.
fn dangling(err: RepositoryError, entity: &str, id: impl std::fmt::Display) -> ServiceError {
    if err.is_not_found() {
        ServiceError::validation(format!("Referenced {} {} does not exist", entity, id))
    } else {
        err.into()
    }
}

pub(crate) fn require_name(entity: &str, name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation(format!(
            "{} name must not be empty",
            entity
        )));
    }
    Ok(())
}

pub(crate) fn require_measure(field: &str, value: f64) -> ServiceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServiceError::validation(format!(
            "{} must be a finite, non-negative number (got {})",
            field, value
        )));
    }
    Ok(())
}

/// Sorted, duplicate-free copy of `ids`.
pub(crate) fn unique<T: Ord + Copy>(ids: &[T]) -> Vec<T> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

pub(crate) async fn ensure_category(
    repo: &dyn FullRepository,
    id: Option<CategoryId>,
) -> ServiceResult<()> {
    if let Some(id) = id {
        repo.get_category(id)
            .await
            .map_err(|e| dangling(e, "category", id))?;
    }
    Ok(())
}

pub(crate) async fn ensure_enclosure(
    repo: &dyn FullRepository,
    id: Option<EnclosureId>,
) -> ServiceResult<Option<Enclosure>> {
    match id {
        Some(id) => Ok(Some(
            repo.get_enclosure(id)
                .await
                .map_err(|e| dangling(e, "enclosure", id))?,
        )),
        None => Ok(None),
    }
}

pub(crate) async fn ensure_zoo(repo: &dyn FullRepository, id: Option<ZooId>) -> ServiceResult<()> {
    if let Some(id) = id {
        repo.get_zoo(id).await.map_err(|e| dangling(e, "zoo", id))?;
    }
    Ok(())
}

/// Load every animal in `ids`, failing on the first id that does not exist.
pub(crate) async fn ensure_animals(
    repo: &dyn FullRepository,
    ids: &[AnimalId],
) -> ServiceResult<Vec<Animal>> {
    let wanted = unique(ids);
    let found = repo.get_animals(&wanted).await?;
    if found.len() != wanted.len() {
        let missing = wanted
            .iter()
            .find(|id| !found.iter().any(|a| a.id == **id))
            .copied();
        if let Some(id) = missing {
            return Err(ServiceError::validation(format!(
                "Referenced animal {} does not exist",
                id
            )));
        }
    }
    Ok(found)
}

pub(crate) async fn ensure_enclosures(
    repo: &dyn FullRepository,
    ids: &[EnclosureId],
) -> ServiceResult<Vec<EnclosureId>> {
    let wanted = unique(ids);
    for id in &wanted {
        repo.get_enclosure(*id)
            .await
            .map_err(|e| dangling(e, "enclosure", id))?;
    }
    Ok(wanted)
}

/// Check an animal input and return it with its prey list normalised.
///
/// `own_id` is set on update so an animal cannot be listed as its own prey.
pub(crate) async fn animal_input(
    repo: &dyn FullRepository,
    input: &NewAnimal,
    own_id: Option<AnimalId>,
) -> ServiceResult<NewAnimal> {
    require_name("Animal", &input.name)?;
    require_measure("space_requirement", input.space_requirement)?;

    let mut input = input.clone();
    input.prey_ids = unique(&input.prey_ids);
    if let Some(own_id) = own_id {
        if input.prey_ids.contains(&own_id) {
            return Err(ServiceError::validation("An animal cannot be its own prey"));
        }
    }
    ensure_animals(repo, &input.prey_ids).await?;
    ensure_category(repo, input.category_id).await?;
    ensure_enclosure(repo, input.enclosure_id).await?;
    ensure_zoo(repo, input.zoo_id).await?;
    Ok(input)
}

pub(crate) async fn enclosure_input(
    repo: &dyn FullRepository,
    input: &NewEnclosure,
) -> ServiceResult<()> {
    require_name("Enclosure", &input.name)?;
    require_measure("size", input.size)?;
    ensure_zoo(repo, input.zoo_id).await?;
    if let Some(ids) = &input.animal_ids {
        ensure_animals(repo, ids).await?;
    }
    Ok(())
}
