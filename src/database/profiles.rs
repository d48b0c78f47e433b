// ABOUTME: Database operations for per-user profile settings
// ABOUTME: Lazily creates one profile row per user and applies range-checked partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{now_timestamp, parse_timestamp};
use crate::models::{FitnessLevel, UserProfile};
use liftshare_core::constants::profile::{
    MAX_AGE, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};
use liftshare_core::errors::{AppError, AppResult};
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Partial profile update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// Height in centimetres
    pub height: Option<i64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Age in years
    pub age: Option<i64>,
    /// Training experience
    pub fitness_level: Option<FitnessLevel>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Check supplied values against their accepted ranges
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if let Some(height) = self.height {
            if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) {
                return Err(AppError::out_of_range(format!(
                    "Height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
                )));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight) {
                return Err(AppError::out_of_range(format!(
                    "Weight must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg"
                )));
            }
        }
        if let Some(age) = self.age {
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                return Err(AppError::out_of_range(format!(
                    "Age must be between {MIN_AGE} and {MAX_AGE}"
                )));
            }
        }
        Ok(())
    }
}

/// Profile database operations manager
pub struct ProfilesManager {
    pool: SqlitePool,
}

impl ProfilesManager {
    /// Create a new profiles manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return the user's profile, creating a beginner profile on first access
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_or_create(&self, user_id: i64) -> AppResult<UserProfile> {
        let now = now_timestamp();

        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, fitness_level, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT(user_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(FitnessLevel::Beginner.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profile: {e}")))?;

        self.get(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Profile missing after insert"))
    }

    /// Get a profile without creating one
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, height, weight, age, fitness_level, avatar_url, created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Apply a validated partial update
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for invalid values, or a database error
    pub async fn update(&self, user_id: i64, update: &ProfileUpdate) -> AppResult<UserProfile> {
        update.validate()?;
        let existing = self.get_or_create(user_id).await?;

        let height = update.height.or(existing.height);
        let weight = update.weight.or(existing.weight);
        let age = update.age.or(existing.age);
        let fitness_level = update.fitness_level.unwrap_or(existing.fitness_level);
        let avatar_url = update.avatar_url.clone().or(existing.avatar_url);

        sqlx::query(
            r"
            UPDATE user_profiles SET
                height = $1, weight = $2, age = $3, fitness_level = $4, avatar_url = $5,
                updated_at = $6
            WHERE user_id = $7
            ",
        )
        .bind(height)
        .bind(weight)
        .bind(age)
        .bind(fitness_level.as_str())
        .bind(&avatar_url)
        .bind(now_timestamp())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        self.get(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Profile missing after update"))
    }
}

/// Convert a database row to a `UserProfile`
fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    let fitness_level: String = row.try_get("fitness_level")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(UserProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        age: row.try_get("age")?,
        fitness_level: fitness_level.parse().map_err(AppError::internal)?,
        avatar_url: row.try_get("avatar_url")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
