//! Data Transfer Objects for the HTTP API.
//!
//! Entity bodies are the model types themselves (`NewAnimal`, `Animal`,
//! `EnclosureDetail`, ...); only the envelopes live here.

use serde::{Deserialize, Serialize};

use crate::models::{
    ActivityPattern, AnimalSize, Climate, DietaryClass, EnumOption, HabitatType, SecurityLevel,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// List envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Messages produced by sunrise, sunset and feeding time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub messages: Vec<String>,
}

impl From<Vec<String>> for ActionResponse {
    fn from(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

/// Confirmation of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(id: impl Into<i64>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
        }
    }
}

/// Option tables for every enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub animal_sizes: Vec<EnumOption>,
    pub dietary_classes: Vec<EnumOption>,
    pub activity_patterns: Vec<EnumOption>,
    pub security_levels: Vec<EnumOption>,
    pub climates: Vec<EnumOption>,
    pub habitat_types: Vec<EnumOption>,
}

impl OptionsResponse {
    pub fn collect() -> Self {
        Self {
            animal_sizes: AnimalSize::options(),
            dietary_classes: DietaryClass::options(),
            activity_patterns: ActivityPattern::options(),
            security_levels: SecurityLevel::options(),
            climates: Climate::options(),
            habitat_types: HabitatType::options(),
        }
    }
}
