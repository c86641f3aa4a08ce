use sea_orm::{Database, DatabaseConnection};

use migration::MigratorTrait;
use store::{Store, StoreError};

async fn store_with_db() -> (Store, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = Store::builder().database(db.clone()).build().await.unwrap();
    (store, db)
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn create_seeds_participants_and_default_admin() {
    let (store, _db) = store_with_db().await;

    let (snapshot, admin_token) = store
        .create_calculation("Weekend Trip", &names(&["Anna", "Bruno", "Carla"]), None)
        .await
        .unwrap();

    assert_eq!(snapshot.calculation.group_name, "Weekend Trip");
    assert_eq!(snapshot.calculation.token.len(), 12);
    assert_eq!(admin_token.len(), 43);
    assert!(snapshot.expenses.is_empty());

    let participant_names: Vec<&str> = snapshot
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(participant_names, vec!["Anna", "Bruno", "Carla"]);
    assert_eq!(snapshot.participants[0].position, 0);
    assert_eq!(snapshot.participants[2].position, 2);

    assert_eq!(snapshot.admins.len(), 1);
    assert_eq!(snapshot.admins[0].name, "Admin");
    assert!(!snapshot.is_open());
}

#[tokio::test]
async fn create_accepts_a_custom_admin_name() {
    let (store, _db) = store_with_db().await;

    let (snapshot, _) = store
        .create_calculation("Flat 4B", &names(&["Anna"]), Some("  Landlord  "))
        .await
        .unwrap();

    assert_eq!(snapshot.admins[0].name, "Landlord");
}

#[tokio::test]
async fn create_collapses_whitespace_in_names() {
    let (store, _db) = store_with_db().await;

    let (snapshot, _) = store
        .create_calculation("  Weekend   Trip ", &names(&[" Anna  Maria "]), None)
        .await
        .unwrap();

    assert_eq!(snapshot.calculation.group_name, "Weekend Trip");
    assert_eq!(snapshot.participants[0].name, "Anna Maria");
}

#[tokio::test]
async fn create_rejects_blank_group_name() {
    let (store, _db) = store_with_db().await;

    let err = store
        .create_calculation("   ", &names(&["Anna"]), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("group name must not be empty".to_string())
    );
}

#[tokio::test]
async fn create_rejects_overlong_group_name() {
    let (store, _db) = store_with_db().await;

    let err = store
        .create_calculation(&"x".repeat(81), &names(&["Anna"]), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("group name must be at most 80 characters".to_string())
    );
}

#[tokio::test]
async fn create_rejects_duplicate_participant_names_case_insensitively() {
    let (store, _db) = store_with_db().await;

    let err = store
        .create_calculation("Trip", &names(&["Anna", "anna"]), None)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateName("anna".to_string()));
}

#[tokio::test]
async fn create_rejects_zero_participants() {
    let (store, _db) = store_with_db().await;

    let err = store.create_calculation("Trip", &[], None).await.unwrap_err();
    assert_eq!(err, StoreError::NoParticipants);
}

#[tokio::test]
async fn create_rejects_too_many_participants() {
    let (store, _db) = store_with_db().await;

    let many: Vec<String> = (0..51).map(|i| format!("P{i}")).collect();
    let err = store
        .create_calculation("Trip", &many, None)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::TooManyParticipants(50));

    let full: Vec<String> = (0..50).map(|i| format!("P{i}")).collect();
    let (snapshot, _) = store.create_calculation("Trip", &full, None).await.unwrap();
    assert_eq!(snapshot.participants.len(), 50);
}

#[tokio::test]
async fn tokens_differ_between_calculations() {
    let (store, _db) = store_with_db().await;

    let (first, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();
    let (second, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();
    assert_ne!(first.calculation.token, second.calculation.token);
}

#[tokio::test]
async fn calculation_by_token_round_trips() {
    let (store, _db) = store_with_db().await;

    let (created, _) = store
        .create_calculation("Weekend Trip", &names(&["Anna", "Bruno"]), None)
        .await
        .unwrap();

    let loaded = store
        .calculation_by_token(&created.calculation.token)
        .await
        .unwrap();
    assert_eq!(loaded.calculation.id, created.calculation.id);
    assert_eq!(loaded.calculation.group_name, "Weekend Trip");
    assert_eq!(loaded.participants, created.participants);
}

#[tokio::test]
async fn calculation_by_token_rejects_unknown_token() {
    let (store, _db) = store_with_db().await;

    let err = store.calculation_by_token("nothere12345").await.unwrap_err();
    assert_eq!(err, StoreError::CalculationNotFound);
}

#[tokio::test]
async fn rename_updates_name_and_timestamp() {
    let (store, _db) = store_with_db().await;

    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();

    let renamed = store
        .rename_calculation(&created.calculation.token, "Summer Trip")
        .await
        .unwrap();
    assert_eq!(renamed.calculation.group_name, "Summer Trip");
    assert!(renamed.calculation.updated_at > created.calculation.updated_at);
    assert_eq!(renamed.calculation.created_at, created.calculation.created_at);
}

#[tokio::test]
async fn rename_rejects_blank_name() {
    let (store, _db) = store_with_db().await;

    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();

    let err = store
        .rename_calculation(&created.calculation.token, " ")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("group name must not be empty".to_string())
    );
}
