use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::ids::{AnimalId, CategoryId};

/// A stored category. `animal_ids` is derived from the animals' category ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub animal_ids: Vec<AnimalId>,
}

/// Input for creating or updating a category.
///
/// When `animal_ids` is given the category's membership is set to exactly
/// those animals; when absent membership is left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub animal_ids: Option<Vec<AnimalId>>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animal_ids: None,
        }
    }

    pub fn with_animals(mut self, animal_ids: Vec<AnimalId>) -> Self {
        self.animal_ids = Some(animal_ids);
        self
    }
}

/// A category loaded together with its animals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub animals: Vec<Animal>,
}
