use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::enclosure::Enclosure;
use super::ids::{AnimalId, EnclosureId, ZooId};

/// A stored zoo. Both id lists are derived from the members' `zoo_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zoo {
    pub id: ZooId,
    pub name: String,
    #[serde(default)]
    pub animal_ids: Vec<AnimalId>,
    #[serde(default)]
    pub enclosure_ids: Vec<EnclosureId>,
}

/// Input for creating or updating a zoo. Membership lists replace the
/// current members when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewZoo {
    pub name: String,
    pub animal_ids: Option<Vec<AnimalId>>,
    pub enclosure_ids: Option<Vec<EnclosureId>>,
}

impl NewZoo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_animals(mut self, animal_ids: Vec<AnimalId>) -> Self {
        self.animal_ids = Some(animal_ids);
        self
    }

    pub fn with_enclosures(mut self, enclosure_ids: Vec<EnclosureId>) -> Self {
        self.enclosure_ids = Some(enclosure_ids);
        self
    }
}

/// A zoo loaded together with its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZooDetail {
    #[serde(flatten)]
    pub zoo: Zoo,
    pub animals: Vec<Animal>,
    pub enclosures: Vec<Enclosure>,
}
