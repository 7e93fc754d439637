//! Behaviour of the in-memory repository through the repository traits.

mod support;

use zoo_backend::db::repositories::LocalRepository;
use zoo_backend::db::repository::{
    AnimalRepository, CategoryRepository, EnclosureRepository, ZooRepository,
};
use zoo_backend::models::{
    ActivityPattern, AnimalAssignment, AnimalFilter, AnimalId, Climate, DietaryClass,
    HabitatType, NewAnimal, NewEnclosure, SecurityLevel,
};

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let repo = LocalRepository::new();
    let input = NewAnimal::new("Okapi")
        .with_species("Okapia johnstoni")
        .with_diet(DietaryClass::Herbivore)
        .with_activity_pattern(ActivityPattern::Diurnal)
        .with_requirements(250.0, SecurityLevel::Medium);

    let stored = repo.insert_animal(&input).await.unwrap();
    let fetched = repo.get_animal(stored.id).await.unwrap();

    assert_eq!(stored, fetched);
    assert_eq!(fetched.name, "Okapi");
    assert_eq!(fetched.species.as_deref(), Some("Okapia johnstoni"));
    assert_eq!(fetched.space_requirement, 250.0);
    assert_eq!(fetched.security_requirement, SecurityLevel::Medium);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let repo = LocalRepository::new();
    let animal = repo.insert_animal(&NewAnimal::new("Lion")).await.unwrap();

    assert!(repo.delete_animal(animal.id).await.unwrap());
    assert!(!repo.delete_animal(animal.id).await.unwrap());
    let err = repo.get_animal(animal.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_ids_are_assigned_in_order() {
    let repo = LocalRepository::new();
    let first = repo.insert_animal(&NewAnimal::new("A")).await.unwrap();
    let second = repo.insert_animal(&NewAnimal::new("B")).await.unwrap();
    assert!(first.id < second.id);
}

#[tokio::test]
async fn test_enclosure_animal_ids_are_derived() {
    let repo = LocalRepository::new();
    let enclosure = repo
        .insert_enclosure(
            &NewEnclosure::new("Savanne", 500.0)
                .with_climate(Climate::Tropical)
                .with_habitat(HabitatType::GRASSLAND | HabitatType::FOREST),
        )
        .await
        .unwrap();
    let lion = repo
        .insert_animal(&NewAnimal::new("Lion").with_enclosure(enclosure.id))
        .await
        .unwrap();

    let fetched = repo.get_enclosure(enclosure.id).await.unwrap();
    assert_eq!(fetched.animal_ids, vec![lion.id]);
    assert!(fetched.habitat_type.contains(HabitatType::FOREST));

    repo.assign_animals(&[lion.id], AnimalAssignment::Enclosure(None))
        .await
        .unwrap();
    assert!(repo
        .get_enclosure(enclosure.id)
        .await
        .unwrap()
        .animal_ids
        .is_empty());
}

#[tokio::test]
async fn test_deleting_prey_removes_edges() {
    let repo = LocalRepository::new();
    let gazelle = repo.insert_animal(&NewAnimal::new("Gazelle")).await.unwrap();
    let lion = repo
        .insert_animal(&NewAnimal::new("Lion").with_prey(vec![gazelle.id]))
        .await
        .unwrap();
    assert_eq!(lion.prey_ids, vec![gazelle.id]);

    repo.delete_animal(gazelle.id).await.unwrap();
    assert!(repo.get_animal(lion.id).await.unwrap().prey_ids.is_empty());
}

#[tokio::test]
async fn test_delete_category_clears_animal_category() {
    let repo = LocalRepository::new();
    let birds = repo.insert_category("Birds").await.unwrap();
    let eagle = repo
        .insert_animal(&NewAnimal::new("Eagle").with_category(birds.id))
        .await
        .unwrap();
    assert_eq!(
        repo.get_category(birds.id).await.unwrap().animal_ids,
        vec![eagle.id]
    );

    assert!(repo.delete_category(birds.id).await.unwrap());
    assert_eq!(repo.get_animal(eagle.id).await.unwrap().category_id, None);
}

#[tokio::test]
async fn test_zoo_membership_is_derived_and_detached_on_delete() {
    let repo = LocalRepository::new();
    let zoo = repo.insert_zoo("Artis").await.unwrap();
    let enclosure = repo
        .insert_enclosure(&NewEnclosure::new("Pen", 10.0).with_zoo(zoo.id))
        .await
        .unwrap();
    let animal = repo
        .insert_animal(&NewAnimal::new("Goat").with_zoo(zoo.id))
        .await
        .unwrap();

    let fetched = repo.get_zoo(zoo.id).await.unwrap();
    assert_eq!(fetched.animal_ids, vec![animal.id]);
    assert_eq!(fetched.enclosure_ids, vec![enclosure.id]);

    assert!(repo.delete_zoo(zoo.id).await.unwrap());
    assert_eq!(repo.get_animal(animal.id).await.unwrap().zoo_id, None);
    assert_eq!(repo.get_enclosure(enclosure.id).await.unwrap().zoo_id, None);
}

#[tokio::test]
async fn test_find_animals_by_filter() {
    let repo = LocalRepository::new();
    let zoo = repo.insert_zoo("Blijdorp").await.unwrap();
    let inside = repo
        .insert_animal(&NewAnimal::new("In").with_zoo(zoo.id))
        .await
        .unwrap();
    repo.insert_animal(&NewAnimal::new("Out")).await.unwrap();

    let found = repo.find_animals(AnimalFilter::zoo(zoo.id)).await.unwrap();
    assert_eq!(found, vec![inside]);
}

#[tokio::test]
async fn test_get_animals_skips_unknown_ids() {
    let repo = LocalRepository::new();
    let a = repo.insert_animal(&NewAnimal::new("A")).await.unwrap();
    let found = repo.get_animals(&[AnimalId(999), a.id]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, a.id);
}

#[tokio::test]
async fn test_find_enclosure_by_name() {
    let repo = LocalRepository::new();
    let first = repo
        .insert_enclosure(&NewEnclosure::new("DefaultEnclosure", 1000.0))
        .await
        .unwrap();
    let second = repo
        .insert_enclosure(&NewEnclosure::new("DefaultEnclosure", 500.0))
        .await
        .unwrap();

    let found = repo
        .find_enclosure_by_name("DefaultEnclosure", None)
        .await
        .unwrap();
    assert_eq!(found.map(|e| e.id), Some(first.id));

    let other = repo
        .find_enclosure_by_name("DefaultEnclosure", Some(first.id))
        .await
        .unwrap();
    assert_eq!(other.map(|e| e.id), Some(second.id));

    assert!(repo
        .find_enclosure_by_name("Nope", None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_unhealthy_repository_fails_with_retryable_error() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let err = repo.list_animals().await.unwrap_err();
    assert!(err.is_retryable());
    repo.set_healthy(true);
    assert!(repo.health_check().await.unwrap());
}
