use diesel::prelude::*;

use super::schema::{animal_prey, animals, categories, enclosures, zoos};
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::{
    ActivityPattern, Animal, AnimalId, AnimalSize, CategoryId, Climate, DietaryClass, Enclosure,
    EnclosureId, HabitatType, NewAnimal, NewEnclosure, SecurityLevel, ZooId,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = zoos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ZooRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enclosures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EnclosureRow {
    pub id: i64,
    pub name: String,
    pub climate: i16,
    pub habitat_type: i16,
    pub security_level: i16,
    pub size: f64,
    pub zoo_id: Option<i64>,
}

/// Insert and full-update payload for `enclosures`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = enclosures)]
#[diesel(treat_none_as_null = true)]
pub struct EnclosureValues {
    pub name: String,
    pub climate: i16,
    pub habitat_type: i16,
    pub security_level: i16,
    pub size: f64,
    pub zoo_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnimalRow {
    pub id: i64,
    pub name: String,
    pub species: Option<String>,
    pub size: i16,
    pub diet: i16,
    pub activity_pattern: i16,
    pub space_requirement: f64,
    pub security_requirement: i16,
    pub category_id: Option<i64>,
    pub enclosure_id: Option<i64>,
    pub zoo_id: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = animals)]
pub struct NewAnimalRow {
    pub name: String,
    pub species: Option<String>,
    pub size: i16,
    pub diet: i16,
    pub activity_pattern: i16,
    pub space_requirement: f64,
    pub security_requirement: i16,
    pub category_id: Option<i64>,
    pub enclosure_id: Option<i64>,
    pub zoo_id: Option<i64>,
}

/// Update payload for `animals`. The zoo is only written when the update
/// names one, so it is set separately.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = animals)]
#[diesel(treat_none_as_null = true)]
pub struct AnimalChangeset {
    pub name: String,
    pub species: Option<String>,
    pub size: i16,
    pub diet: i16,
    pub activity_pattern: i16,
    pub space_requirement: f64,
    pub security_requirement: i16,
    pub category_id: Option<i64>,
    pub enclosure_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = animal_prey)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnimalPreyRow {
    pub predator_id: i64,
    pub prey_id: i64,
}

fn decode<T>(column: &str, raw: i16, parse: impl Fn(i16) -> Option<T>) -> RepositoryResult<T> {
    parse(raw).ok_or_else(|| {
        RepositoryError::internal(format!("Stored {} value {} is out of range", column, raw))
    })
}

impl From<&NewAnimal> for NewAnimalRow {
    fn from(animal: &NewAnimal) -> Self {
        Self {
            name: animal.name.clone(),
            species: animal.species.clone(),
            size: animal.size.value(),
            diet: animal.diet.value(),
            activity_pattern: animal.activity_pattern.value(),
            space_requirement: animal.space_requirement,
            security_requirement: animal.security_requirement.value(),
            category_id: animal.category_id.map(i64::from),
            enclosure_id: animal.enclosure_id.map(i64::from),
            zoo_id: animal.zoo_id.map(i64::from),
        }
    }
}

impl From<&NewAnimal> for AnimalChangeset {
    fn from(animal: &NewAnimal) -> Self {
        Self {
            name: animal.name.clone(),
            species: animal.species.clone(),
            size: animal.size.value(),
            diet: animal.diet.value(),
            activity_pattern: animal.activity_pattern.value(),
            space_requirement: animal.space_requirement,
            security_requirement: animal.security_requirement.value(),
            category_id: animal.category_id.map(i64::from),
            enclosure_id: animal.enclosure_id.map(i64::from),
        }
    }
}

impl From<&NewEnclosure> for EnclosureValues {
    fn from(enclosure: &NewEnclosure) -> Self {
        Self {
            name: enclosure.name.clone(),
            climate: enclosure.climate.value(),
            habitat_type: i16::from(enclosure.habitat_type.bits()),
            security_level: enclosure.security_level.value(),
            size: enclosure.size,
            zoo_id: enclosure.zoo_id.map(i64::from),
        }
    }
}

impl AnimalRow {
    pub fn into_animal(self, prey_ids: Vec<AnimalId>) -> RepositoryResult<Animal> {
        Ok(Animal {
            id: AnimalId(self.id),
            name: self.name,
            species: self.species,
            size: decode("size", self.size, AnimalSize::from_value)?,
            diet: decode("diet", self.diet, DietaryClass::from_value)?,
            activity_pattern: decode(
                "activity_pattern",
                self.activity_pattern,
                ActivityPattern::from_value,
            )?,
            space_requirement: self.space_requirement,
            security_requirement: decode(
                "security_requirement",
                self.security_requirement,
                SecurityLevel::from_value,
            )?,
            prey_ids,
            category_id: self.category_id.map(CategoryId),
            enclosure_id: self.enclosure_id.map(EnclosureId),
            zoo_id: self.zoo_id.map(ZooId),
        })
    }
}

impl EnclosureRow {
    pub fn into_enclosure(self, animal_ids: Vec<AnimalId>) -> RepositoryResult<Enclosure> {
        let habitat_type = u8::try_from(self.habitat_type)
            .ok()
            .and_then(HabitatType::from_bits)
            .ok_or_else(|| {
                RepositoryError::internal(format!(
                    "Stored habitat_type value {} is out of range",
                    self.habitat_type
                ))
            })?;

        Ok(Enclosure {
            id: EnclosureId(self.id),
            name: self.name,
            climate: decode("climate", self.climate, Climate::from_value)?,
            habitat_type,
            security_level: decode("security_level", self.security_level, SecurityLevel::from_value)?,
            size: self.size,
            zoo_id: self.zoo_id.map(ZooId),
            animal_ids,
        })
    }
}
