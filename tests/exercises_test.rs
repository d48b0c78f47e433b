// ABOUTME: Integration tests for the exercise catalog
// ABOUTME: Covers seeding idempotency, name ordering, and custom exercise creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftshare_core::errors::ErrorCode;
use liftshare_server::database::seed::{catalog_size, seed_exercises};
use liftshare_server::database::CreateExerciseRequest;

#[tokio::test]
async fn test_seed_is_idempotent() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let exercises = database.exercises();

    let inserted = seed_exercises(&exercises).await?;
    assert_eq!(inserted, catalog_size());

    let again = seed_exercises(&exercises).await?;
    assert_eq!(again, 0);

    let listed = exercises.list().await?;
    assert_eq!(listed.len(), catalog_size());
    assert!(listed.iter().all(|e| !e.is_custom));
    Ok(())
}

#[tokio::test]
async fn test_seed_skips_existing_names() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let exercises = database.exercises();
    common::create_test_exercise(&database, "Plank").await?;

    let inserted = seed_exercises(&exercises).await?;
    assert_eq!(inserted, catalog_size() - 1);

    let planks = exercises
        .list()
        .await?
        .into_iter()
        .filter(|e| e.name == "Plank")
        .count();
    assert_eq!(planks, 1);
    Ok(())
}

#[tokio::test]
async fn test_list_is_ordered_by_name() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    for name in ["Zercher squat", "Arnold press", "Muscle-up"] {
        common::create_test_exercise(&database, name).await?;
    }

    let names: Vec<String> = database
        .exercises()
        .list()
        .await?
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Arnold press", "Muscle-up", "Zercher squat"]);
    Ok(())
}

#[tokio::test]
async fn test_created_exercise_is_custom() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let request = CreateExerciseRequest {
        name: Some("Turkish get-up".to_owned()),
        short_description: Some("Floor to standing with a kettlebell".to_owned()),
        video_url: Some("https://example.com/tgu.mp4".to_owned()),
        equipment: Some("Kettlebell".to_owned()),
        ..CreateExerciseRequest::default()
    };

    let created = database.exercises().create(&request).await?;
    assert!(created.is_custom);
    assert_eq!(created.name, "Turkish get-up");
    assert_eq!(created.equipment.as_deref(), Some("Kettlebell"));

    let fetched = database.exercises().get(created.id).await?.unwrap();
    assert_eq!(fetched, created);
    assert!(database.exercises().get(created.id + 1000).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_exercise_rejected() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;

    let missing_name = database
        .exercises()
        .create(&CreateExerciseRequest::default())
        .await
        .unwrap_err();
    assert_eq!(missing_name.code, ErrorCode::MissingRequiredField);

    let bad_video = database
        .exercises()
        .create(&CreateExerciseRequest {
            name: Some("Sketchy".to_owned()),
            video_url: Some("ftp://example.com/clip".to_owned()),
            ..CreateExerciseRequest::default()
        })
        .await
        .unwrap_err();
    assert_eq!(bad_video.code, ErrorCode::InvalidInput);
    assert!(database.exercises().list().await?.is_empty());
    Ok(())
}
