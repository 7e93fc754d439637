//! Zoos, their membership and zoo-wide actions.

use log::info;
use serde::Serialize;

use super::actions::{self, ConstraintReport, PlacementTarget};
use super::error::{ServiceError, ServiceResult};
use super::validation;
use crate::db::repository::FullRepository;
use crate::models::{
    Animal, AnimalAssignment, AnimalFilter, AnimalId, EnclosureId, NewEnclosure, NewZoo, Zoo,
    ZooDetail, ZooId,
};

/// What auto-assign changed in storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutoAssignOutcome {
    pub messages: Vec<String>,
    /// Enclosures created for animals that did not fit anywhere.
    pub created_enclosures: Vec<EnclosureId>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub animal_id: AnimalId,
    pub enclosure_id: EnclosureId,
}

pub struct ZooService<'a> {
    repo: &'a dyn FullRepository,
}

impl<'a> ZooService<'a> {
    pub fn new(repo: &'a dyn FullRepository) -> Self {
        Self { repo }
    }

    async fn animals(&self, id: ZooId) -> ServiceResult<Vec<Animal>> {
        self.repo.get_zoo(id).await?;
        Ok(self.repo.find_animals(AnimalFilter::zoo(id)).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Zoo>> {
        Ok(self.repo.list_zoos().await?)
    }

    pub async fn get(&self, id: ZooId) -> ServiceResult<ZooDetail> {
        let zoo = self.repo.get_zoo(id).await?;
        let animals = self.repo.find_animals(AnimalFilter::zoo(id)).await?;
        let enclosures = self.repo.list_zoo_enclosures(id).await?;
        Ok(ZooDetail {
            zoo,
            animals,
            enclosures,
        })
    }

    pub async fn create(&self, input: &NewZoo) -> ServiceResult<ZooDetail> {
        validation::require_name("Zoo", &input.name)?;
        self.check_members(input).await?;

        let zoo = self.repo.insert_zoo(&input.name).await?;
        if let Some(ids) = &input.animal_ids {
            self.repo
                .assign_animals(ids, AnimalAssignment::Zoo(Some(zoo.id)))
                .await?;
        }
        if let Some(ids) = &input.enclosure_ids {
            self.repo.assign_enclosures_to_zoo(ids, Some(zoo.id)).await?;
        }
        info!("Created zoo {} ({})", zoo.id, zoo.name);
        self.get(zoo.id).await
    }

    /// Rename, and replace each membership list that is present.
    pub async fn update(&self, id: ZooId, input: &NewZoo) -> ServiceResult<ZooDetail> {
        validation::require_name("Zoo", &input.name)?;
        let current = self.repo.get_zoo(id).await?;
        self.check_members(input).await?;

        if let Some(ids) = &input.animal_ids {
            let wanted = validation::unique(ids);
            let leaving: Vec<AnimalId> = current
                .animal_ids
                .iter()
                .filter(|a| !wanted.contains(a))
                .copied()
                .collect();
            self.repo
                .assign_animals(&leaving, AnimalAssignment::Zoo(None))
                .await?;
            self.repo
                .assign_animals(&wanted, AnimalAssignment::Zoo(Some(id)))
                .await?;
        }
        if let Some(ids) = &input.enclosure_ids {
            let wanted = validation::unique(ids);
            let leaving: Vec<EnclosureId> = current
                .enclosure_ids
                .iter()
                .filter(|e| !wanted.contains(e))
                .copied()
                .collect();
            self.repo.assign_enclosures_to_zoo(&leaving, None).await?;
            self.repo.assign_enclosures_to_zoo(&wanted, Some(id)).await?;
        }
        self.repo.rename_zoo(id, &input.name).await?;
        info!("Updated zoo {} ({})", id, input.name);
        self.get(id).await
    }

    async fn check_members(&self, input: &NewZoo) -> ServiceResult<()> {
        if let Some(ids) = &input.animal_ids {
            validation::ensure_animals(self.repo, ids).await?;
        }
        if let Some(ids) = &input.enclosure_ids {
            validation::ensure_enclosures(self.repo, ids).await?;
        }
        Ok(())
    }

    /// Delete a zoo. Its animals and enclosures stay, detached.
    pub async fn delete(&self, id: ZooId) -> ServiceResult<()> {
        if !self.repo.delete_zoo(id).await? {
            return Err(ServiceError::not_found("zoo", id));
        }
        info!("Deleted zoo {}", id);
        Ok(())
    }

    pub async fn add_animal(&self, id: ZooId, animal_id: AnimalId) -> ServiceResult<ZooDetail> {
        self.repo.get_zoo(id).await?;
        self.repo.get_animal(animal_id).await?;
        self.repo
            .assign_animals(&[animal_id], AnimalAssignment::Zoo(Some(id)))
            .await?;
        info!("Added animal {} to zoo {}", animal_id, id);
        self.get(id).await
    }

    /// NotFound when the animal is not a member of the zoo.
    pub async fn remove_animal(&self, id: ZooId, animal_id: AnimalId) -> ServiceResult<ZooDetail> {
        self.repo.get_zoo(id).await?;
        let animal = self.repo.get_animal(animal_id).await?;
        if animal.zoo_id != Some(id) {
            return Err(ServiceError::NotFound(format!(
                "animal {} is not in zoo {}",
                animal_id, id
            )));
        }
        self.repo
            .assign_animals(&[animal_id], AnimalAssignment::Zoo(None))
            .await?;
        info!("Removed animal {} from zoo {}", animal_id, id);
        self.get(id).await
    }

    pub async fn sunrise(&self, id: ZooId) -> ServiceResult<Vec<String>> {
        let animals = self.animals(id).await?;
        info!("Sunrise in zoo {}", id);
        Ok(actions::sunrise(&animals))
    }

    pub async fn sunset(&self, id: ZooId) -> ServiceResult<Vec<String>> {
        let animals = self.animals(id).await?;
        info!("Sunset in zoo {}", id);
        Ok(actions::sunset(&animals))
    }

    pub async fn feeding_time(&self, id: ZooId) -> ServiceResult<Vec<String>> {
        let animals = self.animals(id).await?;
        info!("Feeding time in zoo {}", id);
        Ok(actions::feeding_time(&animals))
    }

    /// House every animal of the zoo that has no enclosure, creating new
    /// enclosures in the zoo when the existing ones are full.
    ///
    /// Each write is its own repository call; a failure part way leaves the
    /// earlier placements in place.
    pub async fn auto_assign(&self, id: ZooId) -> ServiceResult<AutoAssignOutcome> {
        let animals = self.animals(id).await?;
        let enclosures = self.repo.list_zoo_enclosures(id).await?;
        let plan = actions::plan_auto_assign(&animals, &enclosures);

        let mut outcome = AutoAssignOutcome {
            messages: plan.messages(),
            ..Default::default()
        };
        for _ in 0..plan.new_enclosures {
            let created = self
                .repo
                .insert_enclosure(
                    &NewEnclosure::new(actions::NEW_ENCLOSURE_NAME, actions::NEW_ENCLOSURE_SIZE)
                        .with_zoo(id),
                )
                .await?;
            outcome.created_enclosures.push(created.id);
        }

        for placement in &plan.placements {
            let enclosure_id = match placement.target {
                PlacementTarget::Existing(enclosure_id) => enclosure_id,
                PlacementTarget::New(index) => outcome.created_enclosures[index],
            };
            self.repo
                .assign_animals(
                    &[placement.animal_id],
                    AnimalAssignment::Enclosure(Some(enclosure_id)),
                )
                .await?;
            outcome.assignments.push(Assignment {
                animal_id: placement.animal_id,
                enclosure_id,
            });
        }

        info!(
            "Auto-assigned {} animals in zoo {} ({} new enclosures)",
            outcome.assignments.len(),
            id,
            outcome.created_enclosures.len()
        );
        Ok(outcome)
    }

    pub async fn check_constraints(&self, id: ZooId) -> ServiceResult<ConstraintReport> {
        let animals = self.animals(id).await?;
        let housing: Vec<EnclosureId> = validation::unique(
            &animals
                .iter()
                .filter_map(|a| a.enclosure_id)
                .collect::<Vec<_>>(),
        );
        let mut enclosures = Vec::with_capacity(housing.len());
        for enclosure_id in housing {
            enclosures.push(self.repo.get_enclosure(enclosure_id).await?);
        }
        info!("Checking constraints of zoo {}", id);
        Ok(actions::check_constraints(&animals, &enclosures))
    }
}
