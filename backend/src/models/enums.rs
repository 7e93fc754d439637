//! Enumerations shared by the zoo records.
//!
//! All field-less enums are persisted as their `i16` discriminant and travel
//! over JSON as their variant name. [`HabitatType`] is a bitmask and gets its
//! own representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::define_option_enum;

use super::EnumOption;

define_option_enum!(
    /// Body size class of an animal.
    AnimalSize {
        Microscopic = 0 => "Microscopic",
        VerySmall = 1 => "Very small",
        Small = 2 => "Small",
        #[default]
        Medium = 3 => "Medium",
        Large = 4 => "Large",
        VeryLarge = 5 => "Very large",
    }
);

define_option_enum!(
    /// What an animal eats; drives feeding time.
    DietaryClass {
        #[default]
        Carnivore = 0 => "Carnivore",
        Herbivore = 1 => "Herbivore",
        Omnivore = 2 => "Omnivore",
    }
);

define_option_enum!(
    /// When an animal is awake; drives sunrise and sunset.
    ActivityPattern {
        #[default]
        Diurnal = 0 => "Diurnal",
        Nocturnal = 1 => "Nocturnal",
        Cathemeral = 2 => "Cathemeral",
    }
);

define_option_enum!(
    /// Containment level. Ordered: `Low < Medium < High`.
    SecurityLevel {
        #[default]
        Low = 0 => "Low",
        Medium = 1 => "Medium",
        High = 2 => "High",
    }
);

define_option_enum!(
    /// Climate an enclosure provides.
    Climate {
        #[default]
        Tropical = 0 => "Tropical",
        Temperate = 1 => "Temperate",
        #[serde(alias = "Artic")]
        Arctic = 2 => "Arctic",
    }
);

/// Set of habitats an enclosure satisfies at the same time.
///
/// Stored as the raw bits. On the wire it is a list of flag names
/// (`["Forest", "Aquatic"]`); the raw integer is accepted on input as well.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "HabitatTypeRepr", into = "HabitatTypeRepr")]
pub struct HabitatType(u8);

impl HabitatType {
    pub const NONE: HabitatType = HabitatType(0);
    pub const FOREST: HabitatType = HabitatType(1);
    pub const AQUATIC: HabitatType = HabitatType(2);
    pub const DESERT: HabitatType = HabitatType(4);
    pub const GRASSLAND: HabitatType = HabitatType(8);

    /// Single flags in bit order, with their names.
    pub const FLAGS: &'static [(HabitatType, &'static str)] = &[
        (HabitatType::FOREST, "Forest"),
        (HabitatType::AQUATIC, "Aquatic"),
        (HabitatType::DESERT, "Desert"),
        (HabitatType::GRASSLAND, "Grassland"),
    ];

    const MASK: u8 = 0b1111;

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Rejects bits that do not belong to a known flag.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK == 0 {
            Some(HabitatType(bits))
        } else {
            None
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("None") {
            return Some(Self::NONE);
        }
        Self::FLAGS
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(flag, _)| *flag)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: HabitatType) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: HabitatType) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: HabitatType) {
        self.0 &= !other.0;
    }

    /// Names of the flags that are set, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        Self::FLAGS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    pub fn options() -> Vec<EnumOption> {
        std::iter::once(EnumOption {
            value: 0,
            name: "None",
            label: "None",
        })
        .chain(Self::FLAGS.iter().map(|(flag, name)| EnumOption {
            value: i32::from(flag.bits()),
            name: *name,
            label: *name,
        }))
        .collect()
    }
}

impl BitOr for HabitatType {
    type Output = HabitatType;

    fn bitor(self, rhs: HabitatType) -> HabitatType {
        HabitatType(self.0 | rhs.0)
    }
}

impl BitOrAssign for HabitatType {
    fn bitor_assign(&mut self, rhs: HabitatType) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for HabitatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&self.names().join(", "))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum HabitatTypeRepr {
    Bits(u8),
    Names(Vec<String>),
}

impl TryFrom<HabitatTypeRepr> for HabitatType {
    type Error = String;

    fn try_from(repr: HabitatTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            HabitatTypeRepr::Bits(bits) => HabitatType::from_bits(bits)
                .ok_or_else(|| format!("invalid habitat bits: {}", bits)),
            HabitatTypeRepr::Names(names) => {
                let mut habitat = HabitatType::NONE;
                for name in names {
                    let flag = HabitatType::from_name(&name)
                        .ok_or_else(|| format!("unknown habitat type: {}", name))?;
                    habitat.insert(flag);
                }
                Ok(habitat)
            }
        }
    }
}

impl From<HabitatType> for HabitatTypeRepr {
    fn from(habitat: HabitatType) -> Self {
        HabitatTypeRepr::Names(habitat.names().into_iter().map(String::from).collect())
    }
}
