//! Enclosures, their occupants and enclosure-wide actions.

use log::{info, warn};

use super::actions::{self, ConstraintReport};
use super::error::{ServiceError, ServiceResult};
use super::validation;
use crate::config::EnclosureDeletePolicy;
use crate::db::repository::FullRepository;
use crate::models::{
    Animal, AnimalAssignment, AnimalFilter, AnimalId, Enclosure, EnclosureDetail, EnclosureId,
    NewEnclosure,
};

/// Occupants of a deleted enclosure move here under the reassign policy.
pub const DEFAULT_ENCLOSURE_NAME: &str = "DefaultEnclosure";

pub struct EnclosureService<'a> {
    repo: &'a dyn FullRepository,
    delete_policy: EnclosureDeletePolicy,
}

impl<'a> EnclosureService<'a> {
    pub fn new(repo: &'a dyn FullRepository) -> Self {
        Self {
            repo,
            delete_policy: EnclosureDeletePolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: EnclosureDeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    async fn detail(&self, enclosure: Enclosure) -> ServiceResult<EnclosureDetail> {
        let animals = self
            .repo
            .find_animals(AnimalFilter::enclosure(enclosure.id))
            .await?;
        Ok(EnclosureDetail { enclosure, animals })
    }

    async fn occupants(&self, id: EnclosureId) -> ServiceResult<(Enclosure, Vec<Animal>)> {
        let enclosure = self.repo.get_enclosure(id).await?;
        let animals = self.repo.find_animals(AnimalFilter::enclosure(id)).await?;
        Ok((enclosure, animals))
    }

    pub async fn list(&self) -> ServiceResult<Vec<EnclosureDetail>> {
        let enclosures = self.repo.list_enclosures().await?;
        let animals = self.repo.list_animals().await?;
        Ok(enclosures
            .into_iter()
            .map(|enclosure| {
                let animals = animals
                    .iter()
                    .filter(|a| a.enclosure_id == Some(enclosure.id))
                    .cloned()
                    .collect();
                EnclosureDetail { enclosure, animals }
            })
            .collect())
    }

    pub async fn get(&self, id: EnclosureId) -> ServiceResult<EnclosureDetail> {
        let enclosure = self.repo.get_enclosure(id).await?;
        self.detail(enclosure).await
    }

    pub async fn create(&self, input: &NewEnclosure) -> ServiceResult<EnclosureDetail> {
        validation::enclosure_input(self.repo, input).await?;
        let enclosure = self.repo.insert_enclosure(input).await?;
        if let Some(ids) = &input.animal_ids {
            self.repo
                .assign_animals(ids, AnimalAssignment::Enclosure(Some(enclosure.id)))
                .await?;
        }
        info!("Created enclosure {} ({})", enclosure.id, enclosure.name);
        self.get(enclosure.id).await
    }

    /// Overwrite the fields, and replace the occupants when `animal_ids` is
    /// present.
    pub async fn update(
        &self,
        id: EnclosureId,
        input: &NewEnclosure,
    ) -> ServiceResult<EnclosureDetail> {
        let current = self.repo.get_enclosure(id).await?;
        validation::enclosure_input(self.repo, input).await?;
        if let Some(ids) = &input.animal_ids {
            let wanted = validation::unique(ids);
            let leaving: Vec<AnimalId> = current
                .animal_ids
                .iter()
                .filter(|a| !wanted.contains(a))
                .copied()
                .collect();
            self.repo
                .assign_animals(&leaving, AnimalAssignment::Enclosure(None))
                .await?;
            self.repo
                .assign_animals(&wanted, AnimalAssignment::Enclosure(Some(id)))
                .await?;
        }
        let enclosure = self.repo.update_enclosure(id, input).await?;
        info!("Updated enclosure {} ({})", id, enclosure.name);
        self.detail(enclosure).await
    }

    /// Delete an enclosure, handling its occupants per the delete policy.
    pub async fn delete(&self, id: EnclosureId) -> ServiceResult<()> {
        let enclosure = self.repo.get_enclosure(id).await?;
        let occupants = enclosure.animal_ids.clone();

        if !occupants.is_empty() {
            match self.delete_policy {
                EnclosureDeletePolicy::Reject => {
                    return Err(ServiceError::invalid_operation(format!(
                        "Enclosure {} still houses {} animals",
                        enclosure.name,
                        occupants.len()
                    )));
                }
                EnclosureDeletePolicy::Reassign => {
                    let fallback = self
                        .repo
                        .find_enclosure_by_name(DEFAULT_ENCLOSURE_NAME, Some(id))
                        .await?
                        .map(|e| e.id);
                    if fallback.is_none() {
                        warn!(
                            "No {} found, {} animals of enclosure {} lose their enclosure",
                            DEFAULT_ENCLOSURE_NAME,
                            occupants.len(),
                            id
                        );
                    }
                    self.repo
                        .assign_animals(&occupants, AnimalAssignment::Enclosure(fallback))
                        .await?;
                }
            }
        }

        if !self.repo.delete_enclosure(id).await? {
            return Err(ServiceError::not_found("enclosure", id));
        }
        info!("Deleted enclosure {} ({})", id, enclosure.name);
        Ok(())
    }

    /// Put an animal into the enclosure, moving it out of any other one.
    pub async fn add_animal(
        &self,
        id: EnclosureId,
        animal_id: AnimalId,
    ) -> ServiceResult<EnclosureDetail> {
        self.assign_animal(id, animal_id).await?;
        self.get(id).await
    }

    /// Take an animal out of the enclosure. NotFound when it is not inside.
    pub async fn remove_animal(
        &self,
        id: EnclosureId,
        animal_id: AnimalId,
    ) -> ServiceResult<EnclosureDetail> {
        self.repo.get_enclosure(id).await?;
        let animal = self.repo.get_animal(animal_id).await?;
        if animal.enclosure_id != Some(id) {
            return Err(ServiceError::NotFound(format!(
                "animal {} is not in enclosure {}",
                animal_id, id
            )));
        }
        self.repo
            .assign_animals(&[animal_id], AnimalAssignment::Enclosure(None))
            .await?;
        info!("Removed animal {} from enclosure {}", animal_id, id);
        self.get(id).await
    }

    /// Set the animal's enclosure and return the updated animal.
    pub async fn assign_animal(&self, id: EnclosureId, animal_id: AnimalId) -> ServiceResult<Animal> {
        self.repo.get_enclosure(id).await?;
        self.repo.get_animal(animal_id).await?;
        self.repo
            .assign_animals(&[animal_id], AnimalAssignment::Enclosure(Some(id)))
            .await?;
        info!("Assigned animal {} to enclosure {}", animal_id, id);
        Ok(self.repo.get_animal(animal_id).await?)
    }

    pub async fn animal_ids(&self, id: EnclosureId) -> ServiceResult<Vec<AnimalId>> {
        Ok(self.repo.get_enclosure(id).await?.animal_ids)
    }

    pub async fn sunrise(&self, id: EnclosureId) -> ServiceResult<Vec<String>> {
        let (_, animals) = self.occupants(id).await?;
        info!("Sunrise in enclosure {}", id);
        Ok(actions::sunrise(&animals))
    }

    pub async fn sunset(&self, id: EnclosureId) -> ServiceResult<Vec<String>> {
        let (_, animals) = self.occupants(id).await?;
        info!("Sunset in enclosure {}", id);
        Ok(actions::sunset(&animals))
    }

    pub async fn feeding_time(&self, id: EnclosureId) -> ServiceResult<Vec<String>> {
        let (_, animals) = self.occupants(id).await?;
        info!("Feeding time in enclosure {}", id);
        Ok(actions::feeding_time(&animals))
    }

    pub async fn check_constraints(&self, id: EnclosureId) -> ServiceResult<ConstraintReport> {
        let (enclosure, animals) = self.occupants(id).await?;
        info!("Checking constraints of enclosure {}", id);
        Ok(actions::check_constraints(&animals, &[enclosure]))
    }
}
