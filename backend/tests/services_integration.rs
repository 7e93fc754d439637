//! Domain services against the in-memory repository.

mod support;

use support::{insert_animal, insert_enclosure, insert_zoo, local_repo};
use zoo_backend::config::{CategoryDeleteBehavior, EnclosureDeletePolicy};
use zoo_backend::models::{
    ActivityPattern, AnimalId, CategoryId, DietaryClass, EnclosureId, NewAnimal, NewCategory,
    NewEnclosure, NewZoo, SecurityLevel, ZooId,
};
use zoo_backend::services::{
    AnimalService, CategoryService, EnclosureService, ServiceError, ZooService,
};

// =============================================================================
// Animals
// =============================================================================

#[tokio::test]
async fn test_animal_create_rejects_empty_name() {
    let repo = local_repo();
    let err = AnimalService::new(repo.as_ref())
        .create(&NewAnimal::new("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_animal_create_rejects_dangling_references() {
    let repo = local_repo();
    let service = AnimalService::new(repo.as_ref());

    let cases = [
        NewAnimal::new("A").with_category(CategoryId(9)),
        NewAnimal::new("B").with_enclosure(EnclosureId(9)),
        NewAnimal::new("C").with_zoo(ZooId(9)),
        NewAnimal::new("D").with_prey(vec![AnimalId(9)]),
    ];
    for input in &cases {
        let err = service.create(input).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(_)),
            "{} should fail validation",
            input.name
        );
    }
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_animal_cannot_prey_on_itself() {
    let repo = local_repo();
    let service = AnimalService::new(repo.as_ref());
    let wolf = service.create(&NewAnimal::new("Wolf")).await.unwrap();

    let err = service
        .update(wolf.id, &NewAnimal::new("Wolf").with_prey(vec![wolf.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_animal_update_keeps_zoo_and_dedups_prey() {
    let repo = local_repo();
    let zoo = insert_zoo(repo.as_ref(), "Artis").await;
    let service = AnimalService::new(repo.as_ref());
    let rabbit = service.create(&NewAnimal::new("Rabbit")).await.unwrap();
    let fox = service
        .create(&NewAnimal::new("Fox").with_zoo(zoo.id))
        .await
        .unwrap();

    let updated = service
        .update(
            fox.id,
            &NewAnimal::new("Red fox")
                .with_diet(DietaryClass::Omnivore)
                .with_prey(vec![rabbit.id, rabbit.id]),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Red fox");
    assert_eq!(updated.diet, DietaryClass::Omnivore);
    assert_eq!(updated.prey_ids, vec![rabbit.id]);
    assert_eq!(updated.zoo_id, Some(zoo.id));
}

#[tokio::test]
async fn test_animal_update_with_zoo_moves_animal() {
    let repo = local_repo();
    let artis = insert_zoo(repo.as_ref(), "Artis").await;
    let blijdorp = insert_zoo(repo.as_ref(), "Blijdorp").await;
    let service = AnimalService::new(repo.as_ref());
    let lion = service
        .create(&NewAnimal::new("Lion").with_zoo(artis.id))
        .await
        .unwrap();

    let updated = service
        .update(lion.id, &NewAnimal::new("Lion").with_zoo(blijdorp.id))
        .await
        .unwrap();
    assert_eq!(updated.zoo_id, Some(blijdorp.id));
    assert_eq!(service.get(lion.id).await.unwrap().zoo_id, Some(blijdorp.id));

    let zoos = ZooService::new(repo.as_ref());
    assert!(zoos.get(artis.id).await.unwrap().zoo.animal_ids.is_empty());
    assert_eq!(
        zoos.get(blijdorp.id).await.unwrap().zoo.animal_ids,
        vec![lion.id]
    );
}

#[tokio::test]
async fn test_animal_update_and_delete_missing_is_not_found() {
    let repo = local_repo();
    let service = AnimalService::new(repo.as_ref());
    assert!(matches!(
        service.update(AnimalId(1), &NewAnimal::new("X")).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(AnimalId(1)).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_animal_actions() {
    let repo = local_repo();
    let cat = insert_animal(
        repo.as_ref(),
        "Cat",
        ActivityPattern::Cathemeral,
        DietaryClass::Carnivore,
    )
    .await;
    let service = AnimalService::new(repo.as_ref());

    assert_eq!(service.sunrise(cat.id).await.unwrap(), vec!["Cat slaapt nog."]);
    assert!(service.sunset(cat.id).await.unwrap().is_empty());
    assert_eq!(
        service.feeding_time(cat.id).await.unwrap(),
        vec!["Cat eet vlees."]
    );
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_create_with_animals_and_replace_membership() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let b = insert_animal(repo.as_ref(), "B", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = CategoryService::new(repo.as_ref());

    let created = service
        .create(&NewCategory::new("Hoefdieren").with_animals(vec![a.id]))
        .await
        .unwrap();
    assert_eq!(created.category.animal_ids, vec![a.id]);
    assert_eq!(created.animals[0].name, "A");

    let updated = service
        .update(
            created.category.id,
            &NewCategory::new("Grazers").with_animals(vec![b.id]),
        )
        .await
        .unwrap();
    assert_eq!(updated.category.name, "Grazers");
    assert_eq!(updated.category.animal_ids, vec![b.id]);
    assert_eq!(repo.get_animal(a.id).await.unwrap().category_id, None);
}

#[tokio::test]
async fn test_category_rename_without_ids_keeps_members() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = CategoryService::new(repo.as_ref());
    let created = service
        .create(&NewCategory::new("Old").with_animals(vec![a.id]))
        .await
        .unwrap();

    let renamed = service
        .update(created.category.id, &NewCategory::new("New"))
        .await
        .unwrap();
    assert_eq!(renamed.category.animal_ids, vec![a.id]);
}

#[tokio::test]
async fn test_category_delete_cascade_removes_animals() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = CategoryService::new(repo.as_ref());
    let category = service
        .create(&NewCategory::new("Doomed").with_animals(vec![a.id]))
        .await
        .unwrap();

    service.delete(category.category.id).await.unwrap();
    assert!(repo.get_animal(a.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_category_delete_set_null_keeps_animals() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service =
        CategoryService::new(repo.as_ref()).with_delete_behavior(CategoryDeleteBehavior::SetNull);
    let category = service
        .create(&NewCategory::new("Kept").with_animals(vec![a.id]))
        .await
        .unwrap();

    service.delete(category.category.id).await.unwrap();
    assert_eq!(repo.get_animal(a.id).await.unwrap().category_id, None);
    assert!(matches!(
        service.get(category.category.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_category_assign_animal() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = CategoryService::new(repo.as_ref());
    let category = service.create(&NewCategory::new("Birds")).await.unwrap();

    let assigned = service
        .assign_animal(category.category.id, a.id)
        .await
        .unwrap();
    assert_eq!(assigned.category_id, Some(category.category.id));
    assert_eq!(
        service.animal_ids(category.category.id).await.unwrap(),
        vec![a.id]
    );
    assert_eq!(service.animals(category.category.id).await.unwrap().len(), 1);

    assert!(matches!(
        service.assign_animal(category.category.id, AnimalId(99)).await,
        Err(ServiceError::NotFound(_))
    ));
}

// =============================================================================
// Enclosures
// =============================================================================

#[tokio::test]
async fn test_enclosure_create_update_replaces_occupants() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let b = insert_animal(repo.as_ref(), "B", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = EnclosureService::new(repo.as_ref());

    let created = service
        .create(&NewEnclosure::new("Weide", 200.0).with_animals(vec![a.id]))
        .await
        .unwrap();
    assert_eq!(created.enclosure.animal_ids, vec![a.id]);

    let updated = service
        .update(
            created.enclosure.id,
            &NewEnclosure::new("Grote weide", 400.0).with_animals(vec![b.id]),
        )
        .await
        .unwrap();
    assert_eq!(updated.enclosure.name, "Grote weide");
    assert_eq!(updated.enclosure.size, 400.0);
    assert_eq!(updated.enclosure.animal_ids, vec![b.id]);
    assert_eq!(repo.get_animal(a.id).await.unwrap().enclosure_id, None);
}

#[tokio::test]
async fn test_enclosure_create_rejects_negative_size() {
    let repo = local_repo();
    let err = EnclosureService::new(repo.as_ref())
        .create(&NewEnclosure::new("Bad", -1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_enclosure_delete_reassigns_to_default_enclosure() {
    let repo = local_repo();
    let fallback = insert_enclosure(repo.as_ref(), "DefaultEnclosure", 1000.0, SecurityLevel::High).await;
    let doomed = insert_enclosure(repo.as_ref(), "Old", 10.0, SecurityLevel::Low).await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = EnclosureService::new(repo.as_ref());
    service.add_animal(doomed.id, a.id).await.unwrap();

    service.delete(doomed.id).await.unwrap();
    assert_eq!(
        repo.get_animal(a.id).await.unwrap().enclosure_id,
        Some(fallback.id)
    );
}

#[tokio::test]
async fn test_deleting_a_default_enclosure_moves_occupants_to_another() {
    let repo = local_repo();
    let doomed = insert_enclosure(repo.as_ref(), "DefaultEnclosure", 1000.0, SecurityLevel::High).await;
    let other = insert_enclosure(repo.as_ref(), "DefaultEnclosure", 800.0, SecurityLevel::High).await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = EnclosureService::new(repo.as_ref());
    service.add_animal(doomed.id, a.id).await.unwrap();

    service.delete(doomed.id).await.unwrap();
    assert_eq!(
        repo.get_animal(a.id).await.unwrap().enclosure_id,
        Some(other.id)
    );
}

#[tokio::test]
async fn test_enclosure_delete_without_default_unsets_occupants() {
    let repo = local_repo();
    let doomed = insert_enclosure(repo.as_ref(), "Old", 10.0, SecurityLevel::Low).await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = EnclosureService::new(repo.as_ref());
    service.assign_animal(doomed.id, a.id).await.unwrap();

    service.delete(doomed.id).await.unwrap();
    assert_eq!(repo.get_animal(a.id).await.unwrap().enclosure_id, None);
}

#[tokio::test]
async fn test_enclosure_delete_reject_policy() {
    let repo = local_repo();
    let pen = insert_enclosure(repo.as_ref(), "Pen", 10.0, SecurityLevel::Low).await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service =
        EnclosureService::new(repo.as_ref()).with_delete_policy(EnclosureDeletePolicy::Reject);
    service.assign_animal(pen.id, a.id).await.unwrap();

    assert!(matches!(
        service.delete(pen.id).await,
        Err(ServiceError::InvalidOperation(_))
    ));

    service.remove_animal(pen.id, a.id).await.unwrap();
    service.delete(pen.id).await.unwrap();
}

#[tokio::test]
async fn test_enclosure_remove_animal_not_inside_is_not_found() {
    let repo = local_repo();
    let pen = insert_enclosure(repo.as_ref(), "Pen", 10.0, SecurityLevel::Low).await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;

    let err = EnclosureService::new(repo.as_ref())
        .remove_animal(pen.id, a.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_enclosure_actions_and_constraints() {
    let repo = local_repo();
    let pen = insert_enclosure(repo.as_ref(), "Pen", 100.0, SecurityLevel::Medium).await;
    let service = EnclosureService::new(repo.as_ref());
    let owl = insert_animal(repo.as_ref(), "Owl", ActivityPattern::Nocturnal, DietaryClass::Carnivore).await;
    let tiger = repo
        .insert_animal(
            &NewAnimal::new("Tiger")
                .with_requirements(300.0, SecurityLevel::High)
                .with_enclosure(pen.id),
        )
        .await
        .unwrap();
    service.add_animal(pen.id, owl.id).await.unwrap();

    assert_eq!(
        service.sunset(pen.id).await.unwrap(),
        vec!["Owl is wakker geworden.", "Tiger gaat slapen."]
    );
    assert_eq!(service.feeding_time(pen.id).await.unwrap().len(), 2);

    let report = service.check_constraints(pen.id).await.unwrap();
    assert!(!report.all_satisfied());
    assert!(report
        .messages
        .contains(&"Owl: Ruimte en beveiligingseisen zijn voldaan.".to_string()));
    assert!(report
        .messages
        .contains(&"Tiger: Ruimtevereiste is niet voldaan.".to_string()));
    assert!(report
        .messages
        .contains(&"Tiger: Beveiligingseis is niet voldaan.".to_string()));
    assert_eq!(service.animal_ids(pen.id).await.unwrap(), vec![owl.id, tiger.id]);
}

// =============================================================================
// Zoos
// =============================================================================

#[tokio::test]
async fn test_zoo_create_update_membership() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let b = insert_animal(repo.as_ref(), "B", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let pen = insert_enclosure(repo.as_ref(), "Pen", 10.0, SecurityLevel::Low).await;
    let service = ZooService::new(repo.as_ref());

    let zoo = service
        .create(
            &NewZoo::new("Artis")
                .with_animals(vec![a.id])
                .with_enclosures(vec![pen.id]),
        )
        .await
        .unwrap();
    assert_eq!(zoo.zoo.animal_ids, vec![a.id]);
    assert_eq!(zoo.zoo.enclosure_ids, vec![pen.id]);

    let updated = service
        .update(
            zoo.zoo.id,
            &NewZoo::new("Natura Artis Magistra").with_animals(vec![b.id]),
        )
        .await
        .unwrap();
    assert_eq!(updated.zoo.name, "Natura Artis Magistra");
    assert_eq!(updated.zoo.animal_ids, vec![b.id]);
    assert_eq!(updated.zoo.enclosure_ids, vec![pen.id]);
    assert_eq!(updated.animals.len(), 1);
    assert_eq!(updated.enclosures.len(), 1);
}

#[tokio::test]
async fn test_zoo_create_rejects_unknown_members() {
    let repo = local_repo();
    let err = ZooService::new(repo.as_ref())
        .create(&NewZoo::new("Ghost").with_enclosures(vec![EnclosureId(5)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(repo.list_zoos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_zoo_delete_detaches_members() {
    let repo = local_repo();
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = ZooService::new(repo.as_ref());
    let zoo = service
        .create(&NewZoo::new("Gone").with_animals(vec![a.id]))
        .await
        .unwrap();

    service.delete(zoo.zoo.id).await.unwrap();
    let a = repo.get_animal(a.id).await.unwrap();
    assert_eq!(a.zoo_id, None);
    assert!(matches!(
        service.delete(zoo.zoo.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_zoo_add_and_remove_animal() {
    let repo = local_repo();
    let zoo = insert_zoo(repo.as_ref(), "Blijdorp").await;
    let a = insert_animal(repo.as_ref(), "A", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = ZooService::new(repo.as_ref());

    let added = service.add_animal(zoo.id, a.id).await.unwrap();
    assert_eq!(added.zoo.animal_ids, vec![a.id]);

    let removed = service.remove_animal(zoo.id, a.id).await.unwrap();
    assert!(removed.zoo.animal_ids.is_empty());
    assert!(matches!(
        service.remove_animal(zoo.id, a.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_zoo_sunrise_lists_every_member() {
    let repo = local_repo();
    let zoo = insert_zoo(repo.as_ref(), "Artis").await;
    let lion = insert_animal(repo.as_ref(), "Lion", ActivityPattern::Diurnal, DietaryClass::Carnivore).await;
    let owl = insert_animal(repo.as_ref(), "Owl", ActivityPattern::Nocturnal, DietaryClass::Carnivore).await;
    let service = ZooService::new(repo.as_ref());
    service.add_animal(zoo.id, lion.id).await.unwrap();
    service.add_animal(zoo.id, owl.id).await.unwrap();

    assert_eq!(
        service.sunrise(zoo.id).await.unwrap(),
        vec!["Lion is wakker geworden.", "Owl slaapt nog."]
    );
    assert_eq!(
        service.sunset(zoo.id).await.unwrap(),
        vec!["Lion gaat slapen.", "Owl is wakker geworden."]
    );
    assert_eq!(
        service.feeding_time(zoo.id).await.unwrap(),
        vec!["Lion eet vlees.", "Owl eet vlees."]
    );
}

#[tokio::test]
async fn test_zoo_auto_assign_creates_enclosure_when_full() {
    let repo = local_repo();
    let zoo = insert_zoo(repo.as_ref(), "Artis").await;
    let small = repo
        .insert_enclosure(&NewEnclosure::new("Klein", 1.0).with_zoo(zoo.id))
        .await
        .unwrap();
    let service = ZooService::new(repo.as_ref());
    let first = insert_animal(repo.as_ref(), "Eerste", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let second = insert_animal(repo.as_ref(), "Tweede", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    service.add_animal(zoo.id, first.id).await.unwrap();
    service.add_animal(zoo.id, second.id).await.unwrap();

    let outcome = service.auto_assign(zoo.id).await.unwrap();

    assert_eq!(
        outcome.messages,
        vec![
            "Eerste is toegewezen aan verblijf Klein.",
            "Tweede is toegewezen aan nieuw verblijf.",
        ]
    );
    assert_eq!(outcome.created_enclosures.len(), 1);
    let created = repo
        .get_enclosure(outcome.created_enclosures[0])
        .await
        .unwrap();
    assert_eq!(created.name, "Nieuw Verblijf");
    assert_eq!(created.size, 100.0);
    assert_eq!(created.zoo_id, Some(zoo.id));
    assert_eq!(created.animal_ids, vec![second.id]);
    assert_eq!(
        repo.get_animal(first.id).await.unwrap().enclosure_id,
        Some(small.id)
    );

    // Everyone is housed now, so a second run changes nothing.
    let again = service.auto_assign(zoo.id).await.unwrap();
    assert!(again.messages.is_empty());
    assert!(again.created_enclosures.is_empty());
}

#[tokio::test]
async fn test_zoo_check_constraints_flags_unhoused_animals() {
    let repo = local_repo();
    let zoo = insert_zoo(repo.as_ref(), "Artis").await;
    let stray = insert_animal(repo.as_ref(), "Stray", ActivityPattern::Diurnal, DietaryClass::Herbivore).await;
    let service = ZooService::new(repo.as_ref());
    service.add_animal(zoo.id, stray.id).await.unwrap();

    let report = service.check_constraints(zoo.id).await.unwrap();
    assert_eq!(report.messages, vec!["Stray heeft geen verblijf."]);
    assert!(!report.checks[0].space_ok);
    assert!(!report.checks[0].security_ok);
}

#[tokio::test]
async fn test_zoo_actions_on_missing_zoo_are_not_found() {
    let repo = local_repo();
    let service = ZooService::new(repo.as_ref());
    assert!(matches!(
        service.auto_assign(ZooId(42)).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.sunrise(ZooId(42)).await,
        Err(ServiceError::NotFound(_))
    ));
}
