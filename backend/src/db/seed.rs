//! Reference data for an empty store.
//!
//! Three categories, three enclosures and one animal per enclosure. Seeding
//! is skipped when any category already exists.

use log::info;

use super::repository::{FullRepository, RepositoryResult};
use crate::models::{
    ActivityPattern, AnimalSize, Climate, DietaryClass, HabitatType, NewAnimal, NewEnclosure,
    SecurityLevel,
};

/// Whether `ZOO_SEED` asks for seeding (`1` or `true`).
pub fn seed_requested_by_env() -> bool {
    std::env::var("ZOO_SEED")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

/// Load the reference data unless the store already holds categories.
///
/// # Returns
/// * `Ok(true)` if the data was inserted, `Ok(false)` if seeding was skipped
pub async fn seed_if_empty<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    if !repo.list_categories().await?.is_empty() {
        info!("Store already holds categories, skipping seed");
        return Ok(false);
    }

    let mammals = repo.insert_category("Mammals").await?;
    let birds = repo.insert_category("Birds").await?;
    let reptiles = repo.insert_category("Reptiles").await?;

    let savanna = repo
        .insert_enclosure(
            &NewEnclosure::new("Savanna Exhibit", 1000.0)
                .with_climate(Climate::Tropical)
                .with_habitat(HabitatType::GRASSLAND)
                .with_security(SecurityLevel::Medium),
        )
        .await?;
    let aviary = repo
        .insert_enclosure(
            &NewEnclosure::new("Aviary", 500.0)
                .with_climate(Climate::Temperate)
                .with_habitat(HabitatType::FOREST)
                .with_security(SecurityLevel::Low),
        )
        .await?;
    let reptile_house = repo
        .insert_enclosure(
            &NewEnclosure::new("Reptile House", 300.0)
                .with_climate(Climate::Arctic)
                .with_habitat(HabitatType::AQUATIC)
                .with_security(SecurityLevel::High),
        )
        .await?;

    let animals = [
        NewAnimal::new("Lion")
            .with_species("Panthera leo")
            .with_size(AnimalSize::Large)
            .with_diet(DietaryClass::Carnivore)
            .with_activity_pattern(ActivityPattern::Cathemeral)
            .with_requirements(200.0, SecurityLevel::High)
            .with_category(mammals.id)
            .with_enclosure(savanna.id),
        NewAnimal::new("Eagle")
            .with_species("Aquila chrysaetos")
            .with_size(AnimalSize::Medium)
            .with_diet(DietaryClass::Carnivore)
            .with_activity_pattern(ActivityPattern::Diurnal)
            .with_requirements(100.0, SecurityLevel::Medium)
            .with_category(birds.id)
            .with_enclosure(aviary.id),
        NewAnimal::new("Python")
            .with_species("Python reticulatus")
            .with_size(AnimalSize::Large)
            .with_diet(DietaryClass::Carnivore)
            .with_activity_pattern(ActivityPattern::Nocturnal)
            .with_requirements(50.0, SecurityLevel::High)
            .with_category(reptiles.id)
            .with_enclosure(reptile_house.id),
    ];
    for animal in &animals {
        repo.insert_animal(animal).await?;
    }

    info!(
        "Seeded reference data: 3 categories, 3 enclosures, {} animals",
        animals.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{AnimalRepository, EnclosureRepository};

    #[tokio::test]
    async fn test_seed_populates_empty_store_once() {
        let repo = LocalRepository::new();
        assert!(seed_if_empty(&repo).await.unwrap());
        assert!(!seed_if_empty(&repo).await.unwrap());

        let animals = repo.list_animals().await.unwrap();
        assert_eq!(animals.len(), 3);
        let lion = &animals[0];
        assert_eq!(lion.name, "Lion");
        assert_eq!(lion.activity_pattern, ActivityPattern::Cathemeral);

        let savanna = repo.get_enclosure(lion.enclosure_id.unwrap()).await.unwrap();
        assert_eq!(savanna.name, "Savanna Exhibit");
        assert_eq!(savanna.animal_ids, vec![lion.id]);
    }
}
