//! Scripted zoo actions as pure functions over animals and enclosures.
//!
//! Nothing here touches storage. The services load the records, call these
//! functions and persist whatever the result asks for (auto-assign only).

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{ActivityPattern, Animal, AnimalId, DietaryClass, Enclosure, EnclosureId};

/// Name given to enclosures created by auto-assign.
pub const NEW_ENCLOSURE_NAME: &str = "Nieuw Verblijf";
/// Size given to enclosures created by auto-assign.
pub const NEW_ENCLOSURE_SIZE: f64 = 100.0;

// ==================== Sunrise / sunset / feeding ====================

pub fn sunrise_message(animal: &Animal) -> String {
    match animal.activity_pattern {
        ActivityPattern::Diurnal => format!("{} is wakker geworden.", animal.name),
        _ => format!("{} slaapt nog.", animal.name),
    }
}

/// Cathemeral animals produce no sunset message.
pub fn sunset_message(animal: &Animal) -> Option<String> {
    match animal.activity_pattern {
        ActivityPattern::Nocturnal => Some(format!("{} is wakker geworden.", animal.name)),
        ActivityPattern::Diurnal => Some(format!("{} gaat slapen.", animal.name)),
        ActivityPattern::Cathemeral => None,
    }
}

pub fn feeding_message(animal: &Animal) -> String {
    match animal.diet {
        DietaryClass::Carnivore => format!("{} eet vlees.", animal.name),
        DietaryClass::Herbivore => format!("{} eet planten.", animal.name),
        DietaryClass::Omnivore => format!("{} eet zowel vlees als planten.", animal.name),
    }
}

pub fn sunrise(animals: &[Animal]) -> Vec<String> {
    animals.iter().map(sunrise_message).collect()
}

pub fn sunset(animals: &[Animal]) -> Vec<String> {
    animals.iter().filter_map(sunset_message).collect()
}

pub fn feeding_time(animals: &[Animal]) -> Vec<String> {
    animals.iter().map(feeding_message).collect()
}

// ==================== Auto-assign ====================

/// Where an animal ends up after auto-assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PlacementTarget {
    /// An enclosure that already exists.
    Existing(EnclosureId),
    /// Index into [`AutoAssignPlan::new_enclosures`].
    New(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub animal_id: AnimalId,
    pub target: PlacementTarget,
    pub message: String,
}

/// Result of [`plan_auto_assign`]: enclosures to create and where each
/// unassigned animal goes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutoAssignPlan {
    /// Number of new enclosures to create, each named
    /// [`NEW_ENCLOSURE_NAME`] with size [`NEW_ENCLOSURE_SIZE`].
    pub new_enclosures: usize,
    pub placements: Vec<Placement>,
}

impl AutoAssignPlan {
    pub fn messages(&self) -> Vec<String> {
        self.placements.iter().map(|p| p.message.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

struct Slot {
    target: PlacementTarget,
    name: String,
    size: f64,
    occupants: usize,
}

impl Slot {
    fn has_room(&self) -> bool {
        (self.occupants as f64) < self.size
    }
}

/// First-fit placement of every animal without an enclosure.
///
/// Enclosure size is read as a head-count capacity here. Candidates are the
/// given enclosures in id order followed by the ones created along the way.
/// Animals are visited in id order; those already housed are left alone.
pub fn plan_auto_assign(animals: &[Animal], enclosures: &[Enclosure]) -> AutoAssignPlan {
    let mut ordered: Vec<&Enclosure> = enclosures.iter().collect();
    ordered.sort_by_key(|e| e.id);
    let mut slots: Vec<Slot> = ordered
        .into_iter()
        .map(|e| Slot {
            target: PlacementTarget::Existing(e.id),
            name: e.name.clone(),
            size: e.size,
            occupants: e.animal_ids.len(),
        })
        .collect();

    let mut unassigned: Vec<&Animal> = animals.iter().filter(|a| a.enclosure_id.is_none()).collect();
    unassigned.sort_by_key(|a| a.id);

    let mut plan = AutoAssignPlan::default();
    for animal in unassigned {
        let placement = match slots.iter_mut().find(|slot| slot.has_room()) {
            Some(slot) => {
                slot.occupants += 1;
                Placement {
                    animal_id: animal.id,
                    target: slot.target,
                    message: format!("{} is toegewezen aan verblijf {}.", animal.name, slot.name),
                }
            }
            None => {
                let target = PlacementTarget::New(plan.new_enclosures);
                plan.new_enclosures += 1;
                slots.push(Slot {
                    target,
                    name: NEW_ENCLOSURE_NAME.to_string(),
                    size: NEW_ENCLOSURE_SIZE,
                    occupants: 1,
                });
                Placement {
                    animal_id: animal.id,
                    target,
                    message: format!("{} is toegewezen aan nieuw verblijf.", animal.name),
                }
            }
        };
        plan.placements.push(placement);
    }
    plan
}

// ==================== Constraint checks ====================

/// Outcome of the space and security checks for one animal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintCheck {
    pub animal_id: AnimalId,
    pub animal_name: String,
    pub enclosure_id: Option<EnclosureId>,
    pub space_ok: bool,
    pub security_ok: bool,
}

impl ConstraintCheck {
    pub fn satisfied(&self) -> bool {
        self.space_ok && self.security_ok
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstraintReport {
    pub checks: Vec<ConstraintCheck>,
    pub messages: Vec<String>,
}

impl ConstraintReport {
    pub fn all_satisfied(&self) -> bool {
        self.checks.iter().all(ConstraintCheck::satisfied)
    }
}

/// Check every animal against the enclosure it lives in.
///
/// Enclosure size is read as an area here. `enclosures` must hold the
/// enclosure of each housed animal; an animal whose enclosure is missing is
/// reported as having none.
pub fn check_constraints(animals: &[Animal], enclosures: &[Enclosure]) -> ConstraintReport {
    let by_id: HashMap<EnclosureId, &Enclosure> = enclosures.iter().map(|e| (e.id, e)).collect();

    let mut report = ConstraintReport::default();
    for animal in animals {
        let enclosure = animal.enclosure_id.and_then(|id| by_id.get(&id).copied());
        let check = match enclosure {
            Some(enclosure) => ConstraintCheck {
                animal_id: animal.id,
                animal_name: animal.name.clone(),
                enclosure_id: Some(enclosure.id),
                space_ok: enclosure.size >= animal.space_requirement,
                security_ok: enclosure.security_level >= animal.security_requirement,
            },
            None => {
                report.messages.push(format!("{} heeft geen verblijf.", animal.name));
                report.checks.push(ConstraintCheck {
                    animal_id: animal.id,
                    animal_name: animal.name.clone(),
                    enclosure_id: None,
                    space_ok: false,
                    security_ok: false,
                });
                continue;
            }
        };

        if check.satisfied() {
            report.messages.push(format!(
                "{}: Ruimte en beveiligingseisen zijn voldaan.",
                animal.name
            ));
        } else {
            if !check.space_ok {
                report
                    .messages
                    .push(format!("{}: Ruimtevereiste is niet voldaan.", animal.name));
            }
            if !check.security_ok {
                report
                    .messages
                    .push(format!("{}: Beveiligingseis is niet voldaan.", animal.name));
            }
        }
        report.checks.push(check);
    }
    report
}
