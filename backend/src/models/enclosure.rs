use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::enums::{Climate, HabitatType, SecurityLevel};
use super::ids::{AnimalId, EnclosureId, ZooId};

/// A stored enclosure. `animal_ids` is derived from the animals' enclosure ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub id: EnclosureId,
    pub name: String,
    pub climate: Climate,
    pub habitat_type: HabitatType,
    pub security_level: SecurityLevel,
    /// Doubles as an area (constraint checks) and a capacity (auto-assign).
    pub size: f64,
    pub zoo_id: Option<ZooId>,
    #[serde(default)]
    pub animal_ids: Vec<AnimalId>,
}

/// Input for creating or updating an enclosure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEnclosure {
    pub name: String,
    pub climate: Climate,
    pub habitat_type: HabitatType,
    pub security_level: SecurityLevel,
    pub size: f64,
    pub zoo_id: Option<ZooId>,
    /// Replaces the occupants when present.
    pub animal_ids: Option<Vec<AnimalId>>,
}

impl NewEnclosure {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }

    pub fn with_climate(mut self, climate: Climate) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_habitat(mut self, habitat_type: HabitatType) -> Self {
        self.habitat_type = habitat_type;
        self
    }

    pub fn with_security(mut self, level: SecurityLevel) -> Self {
        self.security_level = level;
        self
    }

    pub fn with_zoo(mut self, zoo_id: ZooId) -> Self {
        self.zoo_id = Some(zoo_id);
        self
    }

    pub fn with_animals(mut self, animal_ids: Vec<AnimalId>) -> Self {
        self.animal_ids = Some(animal_ids);
        self
    }
}

impl Enclosure {
    /// Build the stored record for a freshly assigned id. Occupants are
    /// attached separately.
    pub fn from_new(id: EnclosureId, input: NewEnclosure) -> Self {
        Self {
            id,
            name: input.name,
            climate: input.climate,
            habitat_type: input.habitat_type,
            security_level: input.security_level,
            size: input.size,
            zoo_id: input.zoo_id,
            animal_ids: Vec::new(),
        }
    }

    pub fn apply_update(&mut self, input: &NewEnclosure) {
        self.name = input.name.clone();
        self.climate = input.climate;
        self.habitat_type = input.habitat_type;
        self.security_level = input.security_level;
        self.size = input.size;
        self.zoo_id = input.zoo_id;
    }
}

/// An enclosure loaded together with its occupants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnclosureDetail {
    #[serde(flatten)]
    pub enclosure: Enclosure,
    pub animals: Vec<Animal>,
}
