use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use store::{ExpenseInput, Store, StoreError};

use migration::MigratorTrait;

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
async fn add_participant_appends_in_order() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();
    let token = &created.calculation.token;

    store.add_participant(token, "Bruno").await.unwrap();
    let snapshot = store.add_participant(token, "Carla").await.unwrap();

    let listed: Vec<&str> = snapshot
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(listed, vec!["Anna", "Bruno", "Carla"]);
    assert_eq!(snapshot.participants[2].position, 2);
}

#[tokio::test]
async fn add_participant_rejects_duplicates_ignoring_case_and_accents() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["José"]), None)
        .await
        .unwrap();

    let err = store
        .add_participant(&created.calculation.token, "jose")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateName("jose".to_string()));
}

#[tokio::test]
async fn add_participant_rejects_unusable_names() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();
    let token = &created.calculation.token;

    let err = store.add_participant(token, "   ").await.unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("participant name must not be empty".to_string())
    );

    let err = store.add_participant(token, "!!!").await.unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("participant name must contain a letter or digit".to_string())
    );

    let err = store
        .add_participant(token, &"x".repeat(41))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("participant name must be at most 40 characters".to_string())
    );
}

#[tokio::test]
async fn add_participant_respects_the_cap() {
    let (store, _db) = store_with_db().await;
    let full: Vec<String> = (0..50).map(|i| format!("P{i}")).collect();
    let (created, _) = store.create_calculation("Trip", &full, None).await.unwrap();

    let err = store
        .add_participant(&created.calculation.token, "One More")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::TooManyParticipants(50));
}

#[tokio::test]
async fn remove_participant_drops_their_shares() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna", "Bruno", "Carla"]), None)
        .await
        .unwrap();
    let token = &created.calculation.token;
    let anna = created.participants[0].id;
    let bruno = created.participants[1].id;
    let carla = created.participants[2].id;

    store
        .add_expense(
            token,
            ExpenseInput {
                description: Some("Dinner".to_string()),
                amount_cents: 3000,
                payer_id: anna,
                participant_ids: vec![anna, bruno, carla],
            },
        )
        .await
        .unwrap();

    let snapshot = store.remove_participant(token, carla).await.unwrap();

    let listed: Vec<&str> = snapshot
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(listed, vec!["Anna", "Bruno"]);
    assert_eq!(snapshot.expenses[0].participant_ids, vec![anna, bruno]);
}

#[tokio::test]
async fn remove_participant_rejects_a_payer() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna", "Bruno"]), None)
        .await
        .unwrap();
    let token = &created.calculation.token;
    let bruno = created.participants[1].id;

    store
        .add_expense(
            token,
            ExpenseInput {
                description: None,
                amount_cents: 500,
                payer_id: bruno,
                participant_ids: vec![bruno],
            },
        )
        .await
        .unwrap();

    let err = store.remove_participant(token, bruno).await.unwrap_err();
    assert_eq!(err, StoreError::ParticipantIsPayer(1));
}

#[tokio::test]
async fn removing_the_last_sharer_falls_back_to_the_payer() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna", "Bruno"]), None)
        .await
        .unwrap();
    let token = &created.calculation.token;
    let anna = created.participants[0].id;
    let bruno = created.participants[1].id;

    store
        .add_expense(
            token,
            ExpenseInput {
                description: None,
                amount_cents: 800,
                payer_id: anna,
                participant_ids: vec![bruno],
            },
        )
        .await
        .unwrap();

    let snapshot = store.remove_participant(token, bruno).await.unwrap();
    assert_eq!(snapshot.expenses[0].participant_ids, vec![anna]);
}

#[tokio::test]
async fn remove_participant_rejects_unknown_ids() {
    let (store, _db) = store_with_db().await;
    let (created, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();

    let err = store
        .remove_participant(&created.calculation.token, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::ParticipantNotFound);
}

#[tokio::test]
async fn participants_are_scoped_to_their_calculation() {
    let (store, _db) = store_with_db().await;
    let (first, _) = store
        .create_calculation("Trip", &names(&["Anna"]), None)
        .await
        .unwrap();
    let (second, _) = store
        .create_calculation("Flat", &names(&["Bruno"]), None)
        .await
        .unwrap();

    let err = store
        .remove_participant(&first.calculation.token, second.participants[0].id)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::ParticipantNotFound);
}
