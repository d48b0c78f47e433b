// ABOUTME: Integration tests for user account persistence
// ABOUTME: Verifies credential hashing, email uniqueness, partial updates, and cascading deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftshare_core::constants::EMAIL_TAKEN;
use liftshare_core::errors::ErrorCode;
use liftshare_server::auth::verify_password;
use liftshare_server::database::{CreateWorkoutRequest, NewUser, ProfileUpdate, UserUpdate};

#[tokio::test]
async fn test_stored_credential_is_a_hash() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let user = common::create_test_user(&database, "hash@example.com").await?;

    let stored = user.password_hash.expect("password user has a hash");
    assert_ne!(stored, common::TEST_PASSWORD);
    assert!(stored.starts_with("$2"));
    assert!(verify_password(common::TEST_PASSWORD, &stored).await?);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_conflicts() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    common::create_test_user(&database, "twice@example.com").await?;

    let error = common::create_test_user(&database, "twice@example.com")
        .await
        .unwrap_err()
        .downcast::<liftshare_core::errors::AppError>()?;

    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(error.message, EMAIL_TAKEN);
    assert_eq!(error.http_status(), 400);
    assert_eq!(database.users().count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_external_account_has_no_credential() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let new_user = NewUser {
        email: "oauth@example.com".to_owned(),
        password: None,
        name: "OAuth".to_owned(),
        google_id: Some("google-sub-123".to_owned()),
    };

    let user = database.users().create(&new_user, common::TEST_BCRYPT_COST).await?;
    assert!(user.password_hash.is_none());
    assert_eq!(user.google_id.as_deref(), Some("google-sub-123"));
    Ok(())
}

#[tokio::test]
async fn test_update_without_password_keeps_hash() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let user = common::create_test_user(&database, "keep@example.com").await?;

    let update = UserUpdate {
        name: Some("Renamed".to_owned()),
        ..UserUpdate::default()
    };
    let updated = database
        .users()
        .update(user.id, &update, common::TEST_BCRYPT_COST)
        .await?
        .expect("user exists");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "keep@example.com");
    assert_eq!(updated.password_hash, user.password_hash);
    Ok(())
}

#[tokio::test]
async fn test_update_with_password_hashes_once() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let user = common::create_test_user(&database, "rotate@example.com").await?;

    let update = UserUpdate {
        password: Some("a brand new secret".to_owned()),
        ..UserUpdate::default()
    };
    let updated = database
        .users()
        .update(user.id, &update, common::TEST_BCRYPT_COST)
        .await?
        .expect("user exists");

    let stored = updated.password_hash.expect("hash present");
    assert_ne!(Some(stored.clone()), user.password_hash);
    assert!(verify_password("a brand new secret", &stored).await?);
    assert!(!verify_password(common::TEST_PASSWORD, &stored).await?);
    Ok(())
}

#[tokio::test]
async fn test_update_missing_user_returns_none() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let result = database
        .users()
        .update(9999, &UserUpdate::default(), common::TEST_BCRYPT_COST)
        .await?;
    assert!(result.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_user_cascades() -> anyhow::Result<()> {
    let database = common::create_test_database().await?;
    let user = common::create_test_user(&database, "cascade@example.com").await?;
    let exercise = common::create_test_exercise(&database, "Goblet squat").await?;

    let request: CreateWorkoutRequest = serde_json::from_value(serde_json::json!({
        "name": "Legs",
        "exercises": [{"exercise_id": exercise.id}]
    }))?;
    let workout = database.workouts().create(user.id, &request).await?;
    database
        .profiles()
        .update(
            user.id,
            &ProfileUpdate {
                height: Some(180),
                ..ProfileUpdate::default()
            },
        )
        .await?;

    assert!(database.users().delete(user.id).await?);

    assert!(database.workouts().get_own(user.id, workout.id).await?.is_none());
    assert!(database.profiles().get(user.id).await?.is_none());
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_exercises")
        .fetch_one(database.pool())
        .await?;
    assert_eq!(links, 0);
    assert!(database.exercises().get(exercise.id).await?.is_some());
    Ok(())
}
