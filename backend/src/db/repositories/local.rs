//! In-memory local repository implementation.
//!
//! Implements every repository trait over ordered maps guarded by a single
//! `parking_lot::RwLock`. Used for unit tests and local development: fast,
//! deterministic and isolated per instance.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{
    Animal, AnimalAssignment, AnimalFilter, AnimalId, Category, CategoryId, Enclosure,
    EnclosureId, NewAnimal, NewEnclosure, Zoo, ZooId,
};

/// In-memory local repository.
///
/// Cloning shares the underlying store.
///
/// # Example
/// ```ignore
/// use zoo_backend::db::repositories::LocalRepository;
///
/// #[tokio::test]
/// async fn test_category_storage() {
///     let repo = LocalRepository::new();
///     let category = repo.insert_category("Mammals").await.unwrap();
///     assert_eq!(repo.get_category(category.id).await.unwrap().name, "Mammals");
/// }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    animals: BTreeMap<AnimalId, Animal>,
    categories: BTreeMap<CategoryId, String>,
    enclosures: BTreeMap<EnclosureId, Enclosure>,
    zoos: BTreeMap<ZooId, String>,

    // ID counters
    next_animal_id: i64,
    next_category_id: i64,
    next_enclosure_id: i64,
    next_zoo_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            animals: BTreeMap::new(),
            categories: BTreeMap::new(),
            enclosures: BTreeMap::new(),
            zoos: BTreeMap::new(),
            next_animal_id: 1,
            next_category_id: 1,
            next_enclosure_id: 1,
            next_zoo_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn category(&self, id: CategoryId, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            animal_ids: self
                .animals
                .values()
                .filter(|a| a.category_id == Some(id))
                .map(|a| a.id)
                .collect(),
        }
    }

    fn enclosure(&self, stored: &Enclosure) -> Enclosure {
        let mut enclosure = stored.clone();
        enclosure.animal_ids = self
            .animals
            .values()
            .filter(|a| a.enclosure_id == Some(stored.id))
            .map(|a| a.id)
            .collect();
        enclosure
    }

    fn zoo(&self, id: ZooId, name: &str) -> Zoo {
        Zoo {
            id,
            name: name.to_string(),
            animal_ids: self
                .animals
                .values()
                .filter(|a| a.zoo_id == Some(id))
                .map(|a| a.id)
                .collect(),
            enclosure_ids: self
                .enclosures
                .values()
                .filter(|e| e.zoo_id == Some(id))
                .map(|e| e.id)
                .collect(),
        }
    }

    fn remove_animal(&mut self, id: AnimalId) -> bool {
        let existed = self.animals.remove(&id).is_some();
        if existed {
            for other in self.animals.values_mut() {
                other.prey_ids.retain(|prey| *prey != id);
            }
        }
        existed
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository and reset the id counters.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of animals stored.
    pub fn animal_count(&self) -> usize {
        self.data.read().animals.len()
    }

    /// Get the number of enclosures stored.
    pub fn enclosure_count(&self) -> usize {
        self.data.read().enclosures.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Local store is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnimalRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_animals(&self) -> RepositoryResult<Vec<Animal>> {
        self.check_health()?;
        Ok(self.data.read().animals.values().cloned().collect())
    }

    async fn get_animal(&self, id: AnimalId) -> RepositoryResult<Animal> {
        self.check_health()?;
        self.data
            .read()
            .animals
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing("animal", id))
    }

    async fn get_animals(&self, ids: &[AnimalId]) -> RepositoryResult<Vec<Animal>> {
        self.check_health()?;
        let wanted: BTreeSet<AnimalId> = ids.iter().copied().collect();
        let data = self.data.read();
        Ok(wanted
            .into_iter()
            .filter_map(|id| data.animals.get(&id).cloned())
            .collect())
    }

    async fn find_animals(&self, filter: AnimalFilter) -> RepositoryResult<Vec<Animal>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .animals
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn insert_animal(&self, animal: &NewAnimal) -> RepositoryResult<Animal> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = AnimalId(data.next_animal_id);
        data.next_animal_id += 1;
        let stored = Animal::from_new(id, animal.clone());
        data.animals.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_animal(&self, id: AnimalId, animal: &NewAnimal) -> RepositoryResult<Animal> {
        self.check_health()?;
        let mut data = self.data.write();
        let stored = data
            .animals
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::missing("animal", id))?;
        stored.apply_update(animal.clone());
        Ok(stored.clone())
    }

    async fn delete_animal(&self, id: AnimalId) -> RepositoryResult<bool> {
        self.check_health()?;
        Ok(self.data.write().remove_animal(id))
    }

    async fn delete_animals(&self, ids: &[AnimalId]) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        Ok(ids.iter().filter(|id| data.remove_animal(**id)).count())
    }

    async fn assign_animals(
        &self,
        ids: &[AnimalId],
        assignment: AnimalAssignment,
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        let mut touched = 0;
        for id in ids {
            if let Some(animal) = data.animals.get_mut(id) {
                assignment.apply(animal);
                touched += 1;
            }
        }
        Ok(touched)
    }
}

#[async_trait]
impl CategoryRepository for LocalRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .categories
            .iter()
            .map(|(id, name)| data.category(*id, name))
            .collect())
    }

    async fn get_category(&self, id: CategoryId) -> RepositoryResult<Category> {
        self.check_health()?;
        let data = self.data.read();
        data.categories
            .get(&id)
            .map(|name| data.category(id, name))
            .ok_or_else(|| RepositoryError::missing("category", id))
    }

    async fn insert_category(&self, name: &str) -> RepositoryResult<Category> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = CategoryId(data.next_category_id);
        data.next_category_id += 1;
        data.categories.insert(id, name.to_string());
        Ok(data.category(id, name))
    }

    async fn rename_category(&self, id: CategoryId, name: &str) -> RepositoryResult<Category> {
        self.check_health()?;
        let mut data = self.data.write();
        let stored = data
            .categories
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::missing("category", id))?;
        *stored = name.to_string();
        Ok(data.category(id, name))
    }

    async fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for animal in data.animals.values_mut() {
            if animal.category_id == Some(id) {
                animal.category_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl EnclosureRepository for LocalRepository {
    async fn list_enclosures(&self) -> RepositoryResult<Vec<Enclosure>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data.enclosures.values().map(|e| data.enclosure(e)).collect())
    }

    async fn get_enclosure(&self, id: EnclosureId) -> RepositoryResult<Enclosure> {
        self.check_health()?;
        let data = self.data.read();
        data.enclosures
            .get(&id)
            .map(|e| data.enclosure(e))
            .ok_or_else(|| RepositoryError::missing("enclosure", id))
    }

    async fn list_zoo_enclosures(&self, zoo_id: ZooId) -> RepositoryResult<Vec<Enclosure>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .enclosures
            .values()
            .filter(|e| e.zoo_id == Some(zoo_id))
            .map(|e| data.enclosure(e))
            .collect())
    }

    async fn find_enclosure_by_name(
        &self,
        name: &str,
        except: Option<EnclosureId>,
    ) -> RepositoryResult<Option<Enclosure>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .enclosures
            .values()
            .find(|e| e.name == name && Some(e.id) != except)
            .map(|e| data.enclosure(e)))
    }

    async fn insert_enclosure(&self, enclosure: &NewEnclosure) -> RepositoryResult<Enclosure> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = EnclosureId(data.next_enclosure_id);
        data.next_enclosure_id += 1;
        let stored = Enclosure::from_new(id, enclosure.clone());
        data.enclosures.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_enclosure(
        &self,
        id: EnclosureId,
        enclosure: &NewEnclosure,
    ) -> RepositoryResult<Enclosure> {
        self.check_health()?;
        let mut data = self.data.write();
        let stored = data
            .enclosures
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::missing("enclosure", id))?;
        stored.apply_update(enclosure);
        let stored = stored.clone();
        Ok(data.enclosure(&stored))
    }

    async fn delete_enclosure(&self, id: EnclosureId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.enclosures.remove(&id).is_none() {
            return Ok(false);
        }
        for animal in data.animals.values_mut() {
            if animal.enclosure_id == Some(id) {
                animal.enclosure_id = None;
            }
        }
        Ok(true)
    }

    async fn assign_enclosures_to_zoo(
        &self,
        ids: &[EnclosureId],
        zoo_id: Option<ZooId>,
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        let mut touched = 0;
        for id in ids {
            if let Some(enclosure) = data.enclosures.get_mut(id) {
                enclosure.zoo_id = zoo_id;
                touched += 1;
            }
        }
        Ok(touched)
    }
}

#[async_trait]
impl ZooRepository for LocalRepository {
    async fn list_zoos(&self) -> RepositoryResult<Vec<Zoo>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .zoos
            .iter()
            .map(|(id, name)| data.zoo(*id, name))
            .collect())
    }

    async fn get_zoo(&self, id: ZooId) -> RepositoryResult<Zoo> {
        self.check_health()?;
        let data = self.data.read();
        data.zoos
            .get(&id)
            .map(|name| data.zoo(id, name))
            .ok_or_else(|| RepositoryError::missing("zoo", id))
    }

    async fn insert_zoo(&self, name: &str) -> RepositoryResult<Zoo> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = ZooId(data.next_zoo_id);
        data.next_zoo_id += 1;
        data.zoos.insert(id, name.to_string());
        Ok(data.zoo(id, name))
    }

    async fn rename_zoo(&self, id: ZooId, name: &str) -> RepositoryResult<Zoo> {
        self.check_health()?;
        let mut data = self.data.write();
        let stored = data
            .zoos
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::missing("zoo", id))?;
        *stored = name.to_string();
        Ok(data.zoo(id, name))
    }

    async fn delete_zoo(&self, id: ZooId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.zoos.remove(&id).is_none() {
            return Ok(false);
        }
        for animal in data.animals.values_mut() {
            if animal.zoo_id == Some(id) {
                animal.zoo_id = None;
            }
        }
        for enclosure in data.enclosures.values_mut() {
            if enclosure.zoo_id == Some(id) {
                enclosure.zoo_id = None;
            }
        }
        Ok(true)
    }
}
