mod common;

use assert_matches::assert_matches;
use common::TestApp;
use seed_inventory::{
    errors::ServiceError,
    models::{NewSeed, SeedChanges, STATUS_AVAILABLE, STATUS_EXPIRED, STATUS_LOW_STOCK},
    repositories::SeedRepository,
};

fn seed(name: &str, status: &str) -> NewSeed {
    NewSeed::new(name, "Vegetable", 10, "AgriCo", status)
}

#[tokio::test]
async fn first_seed_gets_s001() {
    let app = TestApp::new().await;

    let created = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();

    assert_eq!(created.display_id, "S001");
    assert_eq!(created.name, "Tomato");
    assert_eq!(created.quantity, 10);
}

#[tokio::test]
async fn sequential_creates_number_in_order() {
    let app = TestApp::new().await;

    for n in 1..=12 {
        let created = app
            .repo
            .create(seed(&format!("Seed {n}"), STATUS_AVAILABLE))
            .await
            .unwrap();
        assert_eq!(created.display_id, format!("S{:03}", n));
    }

    let ids: Vec<_> = app
        .repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.display_id)
        .collect();
    assert_eq!(ids.first().map(String::as_str), Some("S001"));
    assert_eq!(ids.last().map(String::as_str), Some("S012"));
}

#[tokio::test]
async fn deleting_newest_seed_frees_its_display_id() {
    let app = TestApp::new().await;
    app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();
    let newest = app.repo.create(seed("Basil", STATUS_AVAILABLE)).await.unwrap();
    assert_eq!(newest.display_id, "S002");

    app.repo.delete(newest.internal_id).await.unwrap();
    let replacement = app.repo.create(seed("Pepper", STATUS_AVAILABLE)).await.unwrap();

    assert_eq!(replacement.display_id, "S002");
    assert_ne!(replacement.internal_id, newest.internal_id);
}

#[tokio::test]
async fn deleting_older_seed_does_not_affect_numbering() {
    let app = TestApp::new().await;
    let first = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();
    app.repo.create(seed("Basil", STATUS_AVAILABLE)).await.unwrap();

    app.repo.delete(first.internal_id).await.unwrap();
    let next = app.repo.create(seed("Pepper", STATUS_AVAILABLE)).await.unwrap();

    assert_eq!(next.display_id, "S003");
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let app = TestApp::new().await;
    let original = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();

    let updated = app
        .repo
        .update(
            original.internal_id,
            SeedChanges {
                quantity: Some(3),
                status: Some(STATUS_LOW_STOCK.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.quantity, 3);
    assert_eq!(updated.status, STATUS_LOW_STOCK);
    assert_eq!(updated.seed_type, original.seed_type);
    assert_eq!(updated.supplier, original.supplier);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.internal_id, original.internal_id);
    assert_eq!(updated.display_id, original.display_id);
    assert_eq!(updated.created_at, original.created_at);

    let reloaded = app.repo.get(original.internal_id).await.unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn empty_update_is_a_no_op() {
    let app = TestApp::new().await;
    let original = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();

    let unchanged = app
        .repo
        .update(original.internal_id, SeedChanges::default())
        .await
        .unwrap();

    assert_eq!(unchanged, original);
}

#[tokio::test]
async fn update_rejects_negative_quantity() {
    let app = TestApp::new().await;
    let original = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();

    let result = app
        .repo
        .update(
            original.internal_id,
            SeedChanges {
                quantity: Some(-1),
                ..Default::default()
            },
        )
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
    assert_eq!(app.repo.get(original.internal_id).await.unwrap().quantity, 10);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let app = TestApp::new().await;

    assert_matches!(app.repo.get(9999).await, Err(ServiceError::NotFound(_)));
    assert_matches!(
        app.repo.update(9999, SeedChanges::default()).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(app.repo.delete(9999).await, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn repeated_delete_is_not_found() {
    let app = TestApp::new().await;
    let created = app.repo.create(seed("Tomato", STATUS_AVAILABLE)).await.unwrap();

    app.repo.delete(created.internal_id).await.unwrap();

    assert_matches!(
        app.repo.delete(created.internal_id).await,
        Err(ServiceError::NotFound(_))
    );
    assert_eq!(app.repo.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn create_rejects_blank_name_without_inserting() {
    let app = TestApp::new().await;

    let result = app.repo.create(seed("   ", STATUS_AVAILABLE)).await;

    assert_matches!(result, Err(ServiceError::ValidationError(msg)) if msg.contains("name"));
    assert_eq!(app.repo.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn status_counts_never_exceed_total() {
    let app = TestApp::new().await;
    for (name, status) in [
        ("Tomato", STATUS_AVAILABLE),
        ("Basil", STATUS_AVAILABLE),
        ("Pepper", STATUS_LOW_STOCK),
        ("Onion", STATUS_EXPIRED),
        ("Kale", "available"),
        ("Leek", "Reserved"),
    ] {
        app.repo.create(seed(name, status)).await.unwrap();
    }

    let summary = app.repo.status_summary().await.unwrap();

    assert_eq!(summary.available, 2);
    assert_eq!(summary.low_stock, 1);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.total, 6);
    assert!(summary.tracked() <= summary.total);
    assert_eq!(summary.other(), 2);
}

#[tokio::test]
async fn status_counts_match_total_when_every_status_is_tracked() {
    let app = TestApp::new().await;
    for (name, status) in [
        ("Tomato", STATUS_AVAILABLE),
        ("Pepper", STATUS_LOW_STOCK),
        ("Basil", STATUS_LOW_STOCK),
        ("Onion", STATUS_EXPIRED),
    ] {
        app.repo.create(seed(name, status)).await.unwrap();
    }

    let summary = app.repo.status_summary().await.unwrap();

    assert_eq!(summary.available, 1);
    assert_eq!(summary.low_stock, 2);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.tracked(), summary.total);
    assert_eq!(summary.other(), 0);
}

#[tokio::test]
async fn ping_succeeds_on_open_database() {
    let app = TestApp::new().await;
    app.repo.ping().await.unwrap();
}
