//! Animal CRUD and per-animal actions.

use log::info;

use super::actions;
use super::error::{ServiceError, ServiceResult};
use super::validation;
use crate::db::repository::FullRepository;
use crate::models::{Animal, AnimalId, NewAnimal};

pub struct AnimalService<'a> {
    repo: &'a dyn FullRepository,
}

impl<'a> AnimalService<'a> {
    pub fn new(repo: &'a dyn FullRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Animal>> {
        Ok(self.repo.list_animals().await?)
    }

    pub async fn get(&self, id: AnimalId) -> ServiceResult<Animal> {
        Ok(self.repo.get_animal(id).await?)
    }

    pub async fn create(&self, input: &NewAnimal) -> ServiceResult<Animal> {
        let input = validation::animal_input(self.repo, input, None).await?;
        let animal = self.repo.insert_animal(&input).await?;
        info!("Created animal {} ({})", animal.id, animal.name);
        Ok(animal)
    }

    /// Overwrite the mutable fields of an animal. Zoo membership is kept
    /// unless the input names a zoo.
    pub async fn update(&self, id: AnimalId, input: &NewAnimal) -> ServiceResult<Animal> {
        self.repo.get_animal(id).await?;
        let input = validation::animal_input(self.repo, input, Some(id)).await?;
        let animal = self.repo.update_animal(id, &input).await?;
        info!("Updated animal {} ({})", animal.id, animal.name);
        Ok(animal)
    }

    pub async fn delete(&self, id: AnimalId) -> ServiceResult<()> {
        if !self.repo.delete_animal(id).await? {
            return Err(ServiceError::not_found("animal", id));
        }
        info!("Deleted animal {}", id);
        Ok(())
    }

    pub async fn sunrise(&self, id: AnimalId) -> ServiceResult<Vec<String>> {
        let animal = self.get(id).await?;
        info!("Sunrise for animal {}", id);
        Ok(vec![actions::sunrise_message(&animal)])
    }

    /// Empty for cathemeral animals.
    pub async fn sunset(&self, id: AnimalId) -> ServiceResult<Vec<String>> {
        let animal = self.get(id).await?;
        info!("Sunset for animal {}", id);
        Ok(actions::sunset_message(&animal).into_iter().collect())
    }

    pub async fn feeding_time(&self, id: AnimalId) -> ServiceResult<Vec<String>> {
        let animal = self.get(id).await?;
        info!("Feeding time for animal {}", id);
        Ok(vec![actions::feeding_message(&animal)])
    }
}
