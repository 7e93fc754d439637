//! Categories and their animals.

use log::info;

use super::error::{ServiceError, ServiceResult};
use super::validation;
use crate::config::CategoryDeleteBehavior;
use crate::db::repository::FullRepository;
use crate::models::{
    Animal, AnimalAssignment, AnimalFilter, AnimalId, Category, CategoryDetail, CategoryId,
    NewCategory,
};

pub struct CategoryService<'a> {
    repo: &'a dyn FullRepository,
    delete_behavior: CategoryDeleteBehavior,
}

impl<'a> CategoryService<'a> {
    pub fn new(repo: &'a dyn FullRepository) -> Self {
        Self {
            repo,
            delete_behavior: CategoryDeleteBehavior::default(),
        }
    }

    pub fn with_delete_behavior(mut self, behavior: CategoryDeleteBehavior) -> Self {
        self.delete_behavior = behavior;
        self
    }

    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.repo.list_categories().await?)
    }

    pub async fn get(&self, id: CategoryId) -> ServiceResult<CategoryDetail> {
        let category = self.repo.get_category(id).await?;
        let animals = self.repo.find_animals(AnimalFilter::category(id)).await?;
        Ok(CategoryDetail { category, animals })
    }

    pub async fn create(&self, input: &NewCategory) -> ServiceResult<CategoryDetail> {
        validation::require_name("Category", &input.name)?;
        if let Some(ids) = &input.animal_ids {
            validation::ensure_animals(self.repo, ids).await?;
        }

        let category = self.repo.insert_category(&input.name).await?;
        if let Some(ids) = &input.animal_ids {
            self.repo
                .assign_animals(ids, AnimalAssignment::Category(Some(category.id)))
                .await?;
        }
        info!("Created category {} ({})", category.id, category.name);
        self.get(category.id).await
    }

    /// Rename, and replace the membership when `animal_ids` is present.
    pub async fn update(&self, id: CategoryId, input: &NewCategory) -> ServiceResult<CategoryDetail> {
        validation::require_name("Category", &input.name)?;
        let current = self.repo.get_category(id).await?;
        if let Some(ids) = &input.animal_ids {
            let wanted = validation::ensure_animals(self.repo, ids).await?;
            let leaving: Vec<AnimalId> = current
                .animal_ids
                .iter()
                .filter(|id| !wanted.iter().any(|a| a.id == **id))
                .copied()
                .collect();
            self.repo
                .assign_animals(&leaving, AnimalAssignment::Category(None))
                .await?;
            let joining: Vec<AnimalId> = wanted.iter().map(|a| a.id).collect();
            self.repo
                .assign_animals(&joining, AnimalAssignment::Category(Some(id)))
                .await?;
        }
        self.repo.rename_category(id, &input.name).await?;
        info!("Updated category {} ({})", id, input.name);
        self.get(id).await
    }

    pub async fn delete(&self, id: CategoryId) -> ServiceResult<()> {
        let category = self.repo.get_category(id).await?;
        if self.delete_behavior == CategoryDeleteBehavior::Cascade {
            let removed = self.repo.delete_animals(&category.animal_ids).await?;
            info!("Deleting category {} removes {} animals", id, removed);
        }
        if !self.repo.delete_category(id).await? {
            return Err(ServiceError::not_found("category", id));
        }
        info!("Deleted category {} ({})", id, category.name);
        Ok(())
    }

    pub async fn assign_animal(&self, id: CategoryId, animal_id: AnimalId) -> ServiceResult<Animal> {
        self.repo.get_category(id).await?;
        self.repo.get_animal(animal_id).await?;
        self.repo
            .assign_animals(&[animal_id], AnimalAssignment::Category(Some(id)))
            .await?;
        info!("Assigned animal {} to category {}", animal_id, id);
        Ok(self.repo.get_animal(animal_id).await?)
    }

    pub async fn animal_ids(&self, id: CategoryId) -> ServiceResult<Vec<AnimalId>> {
        Ok(self.repo.get_category(id).await?.animal_ids)
    }

    pub async fn animals(&self, id: CategoryId) -> ServiceResult<Vec<Animal>> {
        self.repo.get_category(id).await?;
        Ok(self.repo.find_animals(AnimalFilter::category(id)).await?)
    }
}
