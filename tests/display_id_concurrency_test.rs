mod common;

use std::collections::HashSet;

use common::TestApp;
use futures::future::join_all;
use seed_inventory::{
    models::NewSeed,
    repositories::{seed_repository::DISPLAY_ID_MAX_ATTEMPTS, SeedRepository},
};

/// Spawns `contenders` simultaneous creates and checks that every one of them
/// succeeds with its own id from `S001` upwards.
async fn assert_concurrent_creates_succeed(contenders: i32) {
    let app = TestApp::new().await;

    let tasks = (0..contenders).map(|n| {
        let repo = app.repo.clone();
        tokio::spawn(async move {
            repo.create(NewSeed::new(
                format!("Seed {n}"),
                "Vegetable",
                n,
                "AgriCo",
                "Available",
            ))
            .await
        })
    });

    let created: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("create failed"))
        .collect();

    let ids: HashSet<_> = created.iter().map(|s| s.display_id.clone()).collect();
    assert_eq!(ids.len(), created.len());

    let expected: HashSet<_> = (1..=contenders).map(|n| format!("S{:03}", n)).collect();
    assert_eq!(ids, expected);
    assert_eq!(
        app.repo.count_all().await.unwrap(),
        u64::try_from(contenders).unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_display_ids() {
    assert_concurrent_creates_succeed(8).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn more_contenders_than_retry_attempts_all_succeed() {
    let contenders = 32;
    assert!(contenders > DISPLAY_ID_MAX_ATTEMPTS as i32);

    assert_concurrent_creates_succeed(contenders).await;
}
