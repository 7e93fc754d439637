use serde::{Deserialize, Serialize};

use super::enums::{ActivityPattern, AnimalSize, DietaryClass, SecurityLevel};
use super::ids::{AnimalId, CategoryId, EnclosureId, ZooId};

/// A stored animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    pub size: AnimalSize,
    pub diet: DietaryClass,
    pub activity_pattern: ActivityPattern,
    /// Square metres the animal needs.
    pub space_requirement: f64,
    pub security_requirement: SecurityLevel,
    /// Animals this one preys on.
    #[serde(default)]
    pub prey_ids: Vec<AnimalId>,
    pub category_id: Option<CategoryId>,
    pub enclosure_id: Option<EnclosureId>,
    pub zoo_id: Option<ZooId>,
}

/// Input for creating or updating an animal.
///
/// Every field is optional on the wire and falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAnimal {
    pub name: String,
    pub species: Option<String>,
    pub size: AnimalSize,
    pub diet: DietaryClass,
    pub activity_pattern: ActivityPattern,
    pub space_requirement: f64,
    pub security_requirement: SecurityLevel,
    pub prey_ids: Vec<AnimalId>,
    pub category_id: Option<CategoryId>,
    pub enclosure_id: Option<EnclosureId>,
    pub zoo_id: Option<ZooId>,
}

impl NewAnimal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_size(mut self, size: AnimalSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_diet(mut self, diet: DietaryClass) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_activity_pattern(mut self, pattern: ActivityPattern) -> Self {
        self.activity_pattern = pattern;
        self
    }

    pub fn with_requirements(mut self, space: f64, security: SecurityLevel) -> Self {
        self.space_requirement = space;
        self.security_requirement = security;
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_enclosure(mut self, enclosure_id: EnclosureId) -> Self {
        self.enclosure_id = Some(enclosure_id);
        self
    }

    pub fn with_zoo(mut self, zoo_id: ZooId) -> Self {
        self.zoo_id = Some(zoo_id);
        self
    }

    pub fn with_prey(mut self, prey_ids: Vec<AnimalId>) -> Self {
        self.prey_ids = prey_ids;
        self
    }
}

impl Animal {
    /// Build the stored record for a freshly assigned id.
    pub fn from_new(id: AnimalId, input: NewAnimal) -> Self {
        Self {
            id,
            name: input.name,
            species: input.species,
            size: input.size,
            diet: input.diet,
            activity_pattern: input.activity_pattern,
            space_requirement: input.space_requirement,
            security_requirement: input.security_requirement,
            prey_ids: input.prey_ids,
            category_id: input.category_id,
            enclosure_id: input.enclosure_id,
            zoo_id: input.zoo_id,
        }
    }

    /// Copy the mutable fields of `input` onto this record.
    ///
    /// A given `zoo_id` moves the animal to that zoo; leaving it out keeps the
    /// current membership, which is only cleared through the zoo operations.
    pub fn apply_update(&mut self, input: NewAnimal) {
        self.name = input.name;
        self.species = input.species;
        self.size = input.size;
        self.diet = input.diet;
        self.activity_pattern = input.activity_pattern;
        self.space_requirement = input.space_requirement;
        self.security_requirement = input.security_requirement;
        self.prey_ids = input.prey_ids;
        self.category_id = input.category_id;
        self.enclosure_id = input.enclosure_id;
        if input.zoo_id.is_some() {
            self.zoo_id = input.zoo_id;
        }
    }
}

/// Optional foreign-key filters for listing animals. Unset fields match all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimalFilter {
    pub category_id: Option<CategoryId>,
    pub enclosure_id: Option<EnclosureId>,
    pub zoo_id: Option<ZooId>,
}

impl AnimalFilter {
    pub fn category(id: CategoryId) -> Self {
        Self {
            category_id: Some(id),
            ..Default::default()
        }
    }

    pub fn enclosure(id: EnclosureId) -> Self {
        Self {
            enclosure_id: Some(id),
            ..Default::default()
        }
    }

    pub fn zoo(id: ZooId) -> Self {
        Self {
            zoo_id: Some(id),
            ..Default::default()
        }
    }

    pub fn matches(&self, animal: &Animal) -> bool {
        self.category_id.is_none_or(|id| animal.category_id == Some(id))
            && self
                .enclosure_id
                .is_none_or(|id| animal.enclosure_id == Some(id))
            && self.zoo_id.is_none_or(|id| animal.zoo_id == Some(id))
    }
}

/// A single foreign key to set (or clear) on a batch of animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalAssignment {
    Category(Option<CategoryId>),
    Enclosure(Option<EnclosureId>),
    Zoo(Option<ZooId>),
}

impl AnimalAssignment {
    pub fn apply(self, animal: &mut Animal) {
        match self {
            AnimalAssignment::Category(id) => animal.category_id = id,
            AnimalAssignment::Enclosure(id) => animal.enclosure_id = id,
            AnimalAssignment::Zoo(id) => animal.zoo_id = id,
        }
    }
}
